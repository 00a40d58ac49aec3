//! Domain Layer - 领域层
//!
//! Speech Context: 合成请求的值对象与校验规则

pub mod speech;

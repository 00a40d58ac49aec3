//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：批量任务进度查询

mod batch_queries;

pub mod handlers;

pub use batch_queries::*;

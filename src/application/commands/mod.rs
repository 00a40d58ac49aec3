//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：合成、生成、批量生成

mod batch_commands;
mod speech_commands;

pub mod handlers;

pub use batch_commands::*;
pub use speech_commands::*;

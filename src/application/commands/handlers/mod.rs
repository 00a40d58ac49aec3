//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod batch_handlers;
mod speech_handlers;

pub use batch_handlers::*;
pub use speech_handlers::*;

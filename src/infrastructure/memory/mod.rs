//! Memory Layer - In-Memory State Management
//!
//! 实现 BatchTracker，管理批量生成任务的内存状态

mod batch_tracker;

pub use batch_tracker::{InMemoryBatchTracker, DEFAULT_RETENTION};

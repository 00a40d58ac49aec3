//! Worker Layer - Background Task Processing
//!
//! 实现 BatchWorker，处理批量生成任务

mod batch_worker;

pub use batch_worker::{BatchWorker, BatchWorkerConfig};

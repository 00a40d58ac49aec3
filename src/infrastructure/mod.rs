//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod adapters;
pub mod bootstrap;
pub mod cli;
pub mod http;
pub mod memory;
pub mod worker;

pub use memory::InMemoryBatchTracker;
pub use worker::{BatchWorker, BatchWorkerConfig};

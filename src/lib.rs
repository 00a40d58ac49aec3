//! edge-speak - 基于 Edge 在线语音服务的文字转语音工具
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Speech: 文本、音色、语言等值对象与缓存文件命名
//!
//! 应用层 (application/):
//! - Ports: TtsEngine, AudioStorage, BatchTracker
//! - Commands: 保存到指定路径、带缓存生成、批量生成
//! - Queries: 批量任务进度
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Edge TTS 客户端、Fake 客户端、文件存储
//! - CLI: `edge-speak <text> <voice> <output_file>`
//! - HTTP: 单条/批量生成 API
//! - Memory: BatchTracker 内存实现
//! - Worker: BatchWorker 后台分批生成

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};

//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TtsEngine、AudioStorage、BatchTracker）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Speech commands
    GenerateSpeechCommand,
    GeneratedSpeech,
    SaveSpeechCommand,
    SavedSpeech,
    // Batch commands
    BatchGenerateCommand,
    BatchGenerateResponse,
    // Handlers
    handlers::{BatchGenerateHandler, GenerateSpeechHandler, SaveSpeechHandler},
};

pub use error::ApplicationError;

pub use ports::{
    // Audio storage
    AudioStorageError,
    AudioStoragePort,
    // Batch tracker
    BatchError,
    BatchItemResult,
    BatchJob,
    BatchState,
    BatchTrackerPort,
    // TTS engine
    SynthesisRequest,
    SynthesizedAudio,
    TtsEnginePort,
    TtsError,
};

pub use queries::{handlers::GetBatchStatusHandler, GetBatchStatus};

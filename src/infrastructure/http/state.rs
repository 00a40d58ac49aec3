//! Application State
//!
//! HTTP 层共享的端口与用例处理器

use std::sync::Arc;

use crate::application::{
    AudioStoragePort, BatchGenerateHandler, BatchTrackerPort, GenerateSpeechHandler,
    GetBatchStatusHandler, TtsEnginePort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub tts_engine: Arc<dyn TtsEnginePort>,

    // ========== Handlers ==========
    /// 与 BatchWorker 共用同一个实例
    pub generate_handler: Arc<GenerateSpeechHandler>,
    pub batch_generate_handler: BatchGenerateHandler,
    pub batch_status_handler: GetBatchStatusHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        tts_engine: Arc<dyn TtsEnginePort>,
        storage: Arc<dyn AudioStoragePort>,
        batch_tracker: Arc<dyn BatchTrackerPort>,
        default_batch_size: usize,
    ) -> Self {
        let generate_handler = Arc::new(GenerateSpeechHandler::new(
            tts_engine.clone(),
            storage.clone(),
        ));

        Self {
            tts_engine,
            generate_handler,
            batch_generate_handler: BatchGenerateHandler::new(
                storage,
                batch_tracker.clone(),
                default_batch_size,
            ),
            batch_status_handler: GetBatchStatusHandler::new(batch_tracker),
        }
    }
}

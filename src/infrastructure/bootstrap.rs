//! Bootstrap - 两个可执行程序共用的启动装配
//!
//! 日志初始化与 TTS 引擎选择

use std::sync::Arc;

use crate::application::ports::TtsEnginePort;
use crate::config::{LogConfig, TtsConfig, TtsEngineKind};
use crate::infrastructure::adapters::{EdgeTtsClient, EdgeTtsClientConfig, FakeTtsClient};

/// 默认日志过滤规则
pub fn log_filter(config: &LogConfig) -> String {
    format!(
        "{},edge_speak={},tower_http=debug",
        config.level, config.level
    )
}

/// 初始化日志
///
/// `RUST_LOG` 优先；日志写到 stderr，stdout 只留给命令行输出
pub fn init_logging(config: &LogConfig) {
    let log_filter = log_filter(config);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// 按配置创建 TTS 引擎
pub fn create_tts_engine(config: &TtsConfig) -> Arc<dyn TtsEnginePort> {
    match config.engine {
        TtsEngineKind::Edge => Arc::new(EdgeTtsClient::new(EdgeTtsClientConfig {
            audio_format: config.audio_format.clone(),
            rate: config.rate,
            pitch: config.pitch,
            volume: config.volume,
        })),
        TtsEngineKind::Fake => Arc::new(FakeTtsClient::with_defaults()),
    }
}

//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（edge-speak.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["edge-speak", "edge-speak.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `EDGE_SPEAK_`，层级分隔符 `__`）
/// 2. 配置文件（edge-speak.toml 或 edge-speak.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `EDGE_SPEAK_SERVER__PORT=3001`
/// - `EDGE_SPEAK_TTS__ENGINE=fake`
/// - `EDGE_SPEAK_TTS__AUDIO_FORMAT=audio-24khz-96kbitrate-mono-mp3`
/// - `EDGE_SPEAK_STORAGE__OUTPUT_DIR=/data/output`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3001)?
        .set_default("tts.engine", "edge")?
        .set_default("tts.audio_format", "audio-24khz-48kbitrate-mono-mp3")?
        .set_default("tts.rate", 0)?
        .set_default("tts.pitch", 0)?
        .set_default("tts.volume", 0)?
        .set_default("storage.output_dir", "output")?
        .set_default("batch.default_size", 5)?
        .set_default("batch.pause_ms", 500)?
        .set_default("batch.max_concurrent_jobs", 2)?
        .set_default("batch.queue_capacity", 100)?
        .set_default("batch.retention_secs", 3600)?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: EDGE_SPEAK_TTS__ENGINE=fake
    builder = builder.add_source(
        Environment::with_prefix("EDGE_SPEAK")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.tts.audio_format.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS audio format cannot be empty".to_string(),
        ));
    }

    if config.storage.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Output directory cannot be empty".to_string(),
        ));
    }

    if config.batch.default_size == 0 {
        return Err(ConfigError::ValidationError(
            "Default batch size must be at least 1".to_string(),
        ));
    }

    if config.batch.queue_capacity == 0 {
        return Err(ConfigError::ValidationError(
            "Batch queue capacity must be at least 1".to_string(),
        ));
    }

    if config.batch.max_concurrent_jobs == 0 {
        return Err(ConfigError::ValidationError(
            "Max concurrent batch jobs must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("TTS Engine: {}", config.tts.engine.as_str());
    tracing::info!("TTS Audio Format: {}", config.tts.audio_format);
    tracing::info!(
        "TTS Prosody: rate={}% pitch={}Hz volume={}%",
        config.tts.rate,
        config.tts.pitch,
        config.tts.volume
    );
    tracing::info!("Output Directory: {:?}", config.storage.output_dir);
    tracing::info!(
        "Batch: size={}, pause={}ms, jobs={}, queue={}, retention={}s",
        config.batch.default_size,
        config.batch.pause_ms,
        config.batch.max_concurrent_jobs,
        config.batch.queue_capacity,
        config.batch.retention_secs
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

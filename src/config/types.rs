//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// TTS 引擎配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 批量生成配置
    #[serde(default)]
    pub batch: BatchConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3001
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// TTS 引擎类型
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsEngineKind {
    /// Microsoft Edge 在线语音服务
    #[default]
    Edge,
    /// 固定音频，离线调试用
    Fake,
}

impl TtsEngineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsEngineKind::Edge => "edge",
            TtsEngineKind::Fake => "fake",
        }
    }
}

/// TTS 引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// 引擎类型
    #[serde(default)]
    pub engine: TtsEngineKind,

    /// 服务端音频格式
    #[serde(default = "default_audio_format")]
    pub audio_format: String,

    /// 语速偏移（百分比）
    #[serde(default)]
    pub rate: i32,

    /// 音调偏移（Hz）
    #[serde(default)]
    pub pitch: i32,

    /// 音量偏移（百分比）
    #[serde(default)]
    pub volume: i32,
}

fn default_audio_format() -> String {
    "audio-24khz-48kbitrate-mono-mp3".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            engine: TtsEngineKind::default(),
            audio_format: default_audio_format(),
            rate: 0,
            pitch: 0,
            volume: 0,
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 生成音频的输出目录（同时作为 /output 静态目录）
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

/// 批量生成配置
#[derive(Debug, Clone, Deserialize)]
pub struct BatchConfig {
    /// 请求未指定 batchSize 时的每批文本数
    #[serde(default = "default_batch_size")]
    pub default_size: usize,

    /// 两批之间的停顿（毫秒）
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,

    /// 同时运行的批量任务数
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: usize,

    /// 任务队列容量，队列满时新的批量请求返回 503
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// 已完成任务的保留时长（秒）
    #[serde(default = "default_retention_secs")]
    pub retention_secs: u64,
}

fn default_batch_size() -> usize {
    5
}

fn default_pause_ms() -> u64 {
    500
}

fn default_max_concurrent_jobs() -> usize {
    2
}

fn default_queue_capacity() -> usize {
    100
}

fn default_retention_secs() -> u64 {
    3600
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            default_size: default_batch_size(),
            pause_ms: default_pause_ms(),
            max_concurrent_jobs: default_max_concurrent_jobs(),
            queue_capacity: default_queue_capacity(),
            retention_secs: default_retention_secs(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.tts.engine, TtsEngineKind::Edge);
        assert_eq!(config.tts.audio_format, "audio-24khz-48kbitrate-mono-mp3");
        assert_eq!(config.storage.output_dir, PathBuf::from("output"));
        assert_eq!(config.batch.default_size, 5);
        assert_eq!(config.batch.pause_ms, 500);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:3001");
    }

    #[test]
    fn test_engine_kind_names() {
        assert_eq!(TtsEngineKind::Edge.as_str(), "edge");
        assert_eq!(TtsEngineKind::Fake.as_str(), "fake");
    }
}

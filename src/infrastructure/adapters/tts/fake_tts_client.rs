//! Fake TTS Client - 用于测试和离线运行的 TTS 客户端
//!
//! 始终返回固定的音频数据，不实际调用 TTS 服务；记录每次请求，可配置为必然失败

use async_trait::async_trait;
use std::sync::Mutex;

use crate::application::ports::{SynthesisRequest, SynthesizedAudio, TtsEnginePort, TtsError};

/// Fake TTS Client 配置
#[derive(Debug, Clone)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频数据
    pub audio_data: Vec<u8>,
    /// 固定返回的音频格式
    pub audio_format: String,
    /// 模拟合成延迟（毫秒）
    pub latency_ms: u64,
    /// 设置后每次合成都返回该错误信息
    pub failure: Option<String>,
}

impl Default for FakeTtsClientConfig {
    fn default() -> Self {
        Self {
            // 最小的 ID3 头，足以让播放器识别为 mp3
            audio_data: b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec(),
            audio_format: "audio-24khz-48kbitrate-mono-mp3".to_string(),
            latency_ms: 0,
            failure: None,
        }
    }
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    calls: Mutex<Vec<SynthesisRequest>>,
}

impl FakeTtsClient {
    /// 创建新的 FakeTtsClient
    pub fn new(config: FakeTtsClientConfig) -> Self {
        tracing::info!(
            audio_size = config.audio_data.len(),
            latency_ms = config.latency_ms,
            failing = config.failure.is_some(),
            "FakeTtsClient initialized"
        );
        Self {
            config,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 使用默认配置创建
    pub fn with_defaults() -> Self {
        Self::new(FakeTtsClientConfig::default())
    }

    /// 创建一个每次都失败的客户端
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(FakeTtsClientConfig {
            failure: Some(message.into()),
            ..Default::default()
        })
    }

    /// 已收到的请求（按到达顺序）
    pub fn calls(&self) -> Vec<SynthesisRequest> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }
}

#[async_trait]
impl TtsEnginePort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesizedAudio, TtsError> {
        tracing::debug!(
            text_len = request.text.len(),
            voice = %request.voice,
            "FakeTtsClient: returning fixed audio"
        );

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(request);
        }

        if self.config.latency_ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(self.config.latency_ms)).await;
        }

        if let Some(message) = &self.config.failure {
            return Err(TtsError::NetworkError(message.clone()));
        }

        Ok(SynthesizedAudio {
            audio_data: self.config.audio_data.clone(),
            audio_format: self.config.audio_format.clone(),
        })
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

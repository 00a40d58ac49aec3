//! TTS Engine Port - 语音合成引擎抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// TTS 错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 语音合成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 音色名称，例如 `en-US-AriaNeural`
    pub voice: String,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
        }
    }
}

/// 语音合成结果
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// 编码后的音频数据
    pub audio_data: Vec<u8>,
    /// 音频格式标识（服务端格式名）
    pub audio_format: String,
}

/// TTS Engine Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait TtsEnginePort: Send + Sync {
    /// 执行语音合成
    ///
    /// 发送文本和音色到外部服务，返回完整的音频数据
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesizedAudio, TtsError>;

    /// 引擎名称（用于日志）
    fn name(&self) -> &'static str;
}

//! Edge TTS Client - 调用 Microsoft Edge「大声朗读」语音服务
//!
//! 实现 TtsEnginePort trait，协议细节（websocket、SSML、音频分帧）全部交给 msedge-tts
//!
//! msedge-tts 的客户端是阻塞式的，每次合成在 blocking 线程池中建立一条新连接

use async_trait::async_trait;
use msedge_tts::tts::SpeechConfig;

use crate::application::ports::{SynthesisRequest, SynthesizedAudio, TtsEnginePort, TtsError};

/// Edge 服务默认输出格式（24kHz 48kbps 单声道 MP3）
pub const DEFAULT_AUDIO_FORMAT: &str = "audio-24khz-48kbitrate-mono-mp3";

/// Edge TTS 客户端配置
#[derive(Debug, Clone)]
pub struct EdgeTtsClientConfig {
    /// 服务端音频格式名
    pub audio_format: String,
    /// 语速偏移（百分比）
    pub rate: i32,
    /// 音调偏移（Hz）
    pub pitch: i32,
    /// 音量偏移（百分比）
    pub volume: i32,
}

impl Default for EdgeTtsClientConfig {
    fn default() -> Self {
        Self {
            audio_format: DEFAULT_AUDIO_FORMAT.to_string(),
            rate: 0,
            pitch: 0,
            volume: 0,
        }
    }
}

impl EdgeTtsClientConfig {
    pub fn with_audio_format(mut self, audio_format: impl Into<String>) -> Self {
        self.audio_format = audio_format.into();
        self
    }
}

/// Edge TTS 客户端
pub struct EdgeTtsClient {
    config: EdgeTtsClientConfig,
}

impl EdgeTtsClient {
    pub fn new(config: EdgeTtsClientConfig) -> Self {
        tracing::debug!(
            audio_format = %config.audio_format,
            rate = config.rate,
            pitch = config.pitch,
            volume = config.volume,
            "EdgeTtsClient initialized"
        );
        Self { config }
    }

    /// 使用默认配置创建客户端
    pub fn with_default_config() -> Self {
        Self::new(EdgeTtsClientConfig::default())
    }

    /// 构建单次合成的语音参数
    ///
    /// 音色名写入 SSML 属性，同样需要转义
    fn speech_config(&self, voice: &str) -> SpeechConfig {
        SpeechConfig {
            voice_name: escape_ssml(voice),
            audio_format: self.config.audio_format.clone(),
            pitch: self.config.pitch,
            rate: self.config.rate,
            volume: self.config.volume,
        }
    }
}

/// 转义 XML 特殊字符
///
/// msedge-tts 直接把文本拼进 SSML，`&`、`<` 等字符不转义会让服务端拒绝整条请求
pub fn escape_ssml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[async_trait]
impl TtsEnginePort for EdgeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesizedAudio, TtsError> {
        let speech_config = self.speech_config(&request.voice);
        let audio_format = speech_config.audio_format.clone();
        let text = escape_ssml(&request.text);

        tracing::debug!(
            voice = %request.voice,
            text_len = text.len(),
            audio_format = %audio_format,
            "Sending Edge TTS request"
        );

        let audio_data = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, TtsError> {
            let mut client = msedge_tts::tts::client::connect().map_err(|e| {
                TtsError::NetworkError(format!("Cannot connect to Edge TTS service: {}", e))
            })?;
            let audio = client
                .synthesize(&text, &speech_config)
                .map_err(|e| TtsError::ServiceError(e.to_string()))?;
            Ok(audio.audio_bytes)
        })
        .await
        .map_err(|e| TtsError::ServiceError(format!("Synthesis task aborted: {}", e)))??;

        // 音色名错误时服务端不报错，只是不返回音频
        if audio_data.is_empty() {
            return Err(TtsError::InvalidResponse(format!(
                "No audio was received for voice '{}'",
                request.voice
            )));
        }

        tracing::info!(
            voice = %request.voice,
            audio_size = audio_data.len(),
            "Edge TTS synthesis completed"
        );

        Ok(SynthesizedAudio {
            audio_data,
            audio_format,
        })
    }

    fn name(&self) -> &'static str {
        "edge"
    }
}

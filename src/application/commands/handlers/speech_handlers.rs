//! Speech Command Handlers

use std::sync::Arc;

use crate::application::commands::speech_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioStoragePort, SynthesisRequest, TtsEnginePort};
use crate::domain::speech::{audio_file_name, Language, SpeechText, VoiceName};

/// SaveSpeech Handler - 合成并写入指定文件
///
/// 每次调用恰好请求一次 TTS 引擎；文件已存在时覆盖，不创建父目录
pub struct SaveSpeechHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
}

impl SaveSpeechHandler {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>) -> Self {
        Self { tts_engine }
    }

    pub async fn handle(&self, cmd: SaveSpeechCommand) -> Result<SavedSpeech, ApplicationError> {
        let text = SpeechText::new(cmd.text)?;
        let voice = VoiceName::new(cmd.voice)?;

        tracing::info!(
            engine = self.tts_engine.name(),
            voice = %voice,
            text_len = text.as_str().len(),
            output = %cmd.output_path.display(),
            "Synthesizing speech"
        );

        let audio = self
            .tts_engine
            .synthesize(SynthesisRequest::new(text.into_inner(), voice.as_str()))
            .await?;

        tokio::fs::write(&cmd.output_path, &audio.audio_data)
            .await
            .map_err(|e| {
                ApplicationError::StorageError(format!(
                    "Failed to write {}: {}",
                    cmd.output_path.display(),
                    e
                ))
            })?;

        tracing::debug!(
            output = %cmd.output_path.display(),
            size = audio.audio_data.len(),
            format = %audio.audio_format,
            "Audio written"
        );

        Ok(SavedSpeech {
            output_path: cmd.output_path,
            size_bytes: audio.audio_data.len(),
            audio_format: audio.audio_format,
        })
    }
}

/// GenerateSpeech Handler - 生成到输出目录（按语言 + 文本缓存）
pub struct GenerateSpeechHandler {
    tts_engine: Arc<dyn TtsEnginePort>,
    storage: Arc<dyn AudioStoragePort>,
}

impl GenerateSpeechHandler {
    pub fn new(tts_engine: Arc<dyn TtsEnginePort>, storage: Arc<dyn AudioStoragePort>) -> Self {
        Self {
            tts_engine,
            storage,
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateSpeechCommand,
    ) -> Result<GeneratedSpeech, ApplicationError> {
        let text = SpeechText::new(cmd.text)?;
        let language = match cmd.language {
            Some(tag) => Language::new(tag)?,
            None => Language::default(),
        };

        let file_name = audio_file_name(&language, &text);
        let audio_url = self.storage.public_url(&file_name);

        if self.storage.exists(&file_name).await {
            tracing::debug!(file = %file_name, "Cache hit");
            return Ok(GeneratedSpeech {
                audio_url,
                text: text.into_inner(),
                language: language.to_string(),
                cached: true,
                voice: None,
            });
        }

        // 空字符串等同于未指定
        let voice = match cmd.voice.filter(|v| !v.is_empty()) {
            Some(name) => VoiceName::new(name)?,
            None => language.default_voice(),
        };

        tracing::info!(
            language = %language,
            voice = %voice,
            file = %file_name,
            "Generating speech"
        );

        let audio = self
            .tts_engine
            .synthesize(SynthesisRequest::new(text.as_str(), voice.as_str()))
            .await?;
        self.storage.save(&file_name, &audio.audio_data).await?;

        Ok(GeneratedSpeech {
            audio_url,
            text: text.into_inner(),
            language: language.to_string(),
            cached: false,
            voice: Some(voice.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::speech::{DEFAULT_EN_VOICE, DEFAULT_FR_VOICE};
    use crate::infrastructure::adapters::{FakeTtsClient, FakeTtsClientConfig, FileAudioStorage};
    use tempfile::tempdir;

    fn fake_engine() -> Arc<FakeTtsClient> {
        Arc::new(FakeTtsClient::new(FakeTtsClientConfig {
            audio_data: b"ID3fake".to_vec(),
            ..Default::default()
        }))
    }

    #[tokio::test]
    async fn test_save_speech_writes_file_once() {
        let dir = tempdir().unwrap();
        let engine = fake_engine();
        let handler = SaveSpeechHandler::new(engine.clone());
        let output_path = dir.path().join("out.mp3");

        let saved = handler
            .handle(SaveSpeechCommand {
                text: "Hello world".to_string(),
                voice: "en-US-AriaNeural".to_string(),
                output_path: output_path.clone(),
            })
            .await
            .unwrap();

        assert_eq!(saved.output_path, output_path);
        assert_eq!(saved.size_bytes, 7);
        assert_eq!(std::fs::read(&output_path).unwrap(), b"ID3fake");
        assert_eq!(
            engine.calls(),
            vec![SynthesisRequest::new("Hello world", "en-US-AriaNeural")]
        );
    }

    #[tokio::test]
    async fn test_save_speech_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("out.mp3");
        std::fs::write(&output_path, b"old content that is longer").unwrap();

        let handler = SaveSpeechHandler::new(fake_engine());
        handler
            .handle(SaveSpeechCommand {
                text: "Hi".to_string(),
                voice: "en-US-AriaNeural".to_string(),
                output_path: output_path.clone(),
            })
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output_path).unwrap(), b"ID3fake");
    }

    #[tokio::test]
    async fn test_save_speech_engine_failure_writes_nothing() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("out.mp3");
        let handler = SaveSpeechHandler::new(Arc::new(FakeTtsClient::failing("connection reset")));

        let err = handler
            .handle(SaveSpeechCommand {
                text: "Hello".to_string(),
                voice: "en-US-AriaNeural".to_string(),
                output_path: output_path.clone(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ExternalServiceError(_)));
        assert!(err.to_string().contains("connection reset"));
        assert!(!output_path.exists());
    }

    #[tokio::test]
    async fn test_save_speech_missing_parent_dir_fails() {
        let dir = tempdir().unwrap();
        let output_path = dir.path().join("missing").join("out.mp3");
        let engine = fake_engine();
        let handler = SaveSpeechHandler::new(engine.clone());

        let err = handler
            .handle(SaveSpeechCommand {
                text: "Hello".to_string(),
                voice: "en-US-AriaNeural".to_string(),
                output_path,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::StorageError(_)));
        assert_eq!(engine.call_count(), 1);
    }

    #[tokio::test]
    async fn test_save_speech_rejects_empty_voice_before_engine() {
        let dir = tempdir().unwrap();
        let engine = fake_engine();
        let handler = SaveSpeechHandler::new(engine.clone());

        let err = handler
            .handle(SaveSpeechCommand {
                text: "Hello".to_string(),
                voice: String::new(),
                output_path: dir.path().join("out.mp3"),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::ValidationError(_)));
        assert_eq!(engine.call_count(), 0);
    }

    #[tokio::test]
    async fn test_generate_uses_cache_on_second_call() {
        let dir = tempdir().unwrap();
        let engine = fake_engine();
        let storage = Arc::new(FileAudioStorage::new(dir.path()).await.unwrap());
        let handler = GenerateSpeechHandler::new(engine.clone(), storage);

        let first = handler
            .handle(GenerateSpeechCommand {
                text: "apple".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(!first.cached);
        assert_eq!(first.language, "en-US");
        assert_eq!(first.voice.as_deref(), Some(DEFAULT_EN_VOICE));
        assert!(first.audio_url.starts_with("/output/en-US_"));

        let second = handler
            .handle(GenerateSpeechCommand {
                text: "apple".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(second.cached);
        assert_eq!(second.audio_url, first.audio_url);
        assert_eq!(engine.call_count(), 1);
    }

    #[tokio::test]
    async fn test_generate_picks_voice_by_language() {
        let dir = tempdir().unwrap();
        let engine = fake_engine();
        let storage = Arc::new(FileAudioStorage::new(dir.path()).await.unwrap());
        let handler = GenerateSpeechHandler::new(engine.clone(), storage);

        let result = handler
            .handle(GenerateSpeechCommand {
                text: "pomme".to_string(),
                language: Some("fr-FR".to_string()),
                voice: Some(String::new()),
            })
            .await
            .unwrap();
        assert_eq!(result.voice.as_deref(), Some(DEFAULT_FR_VOICE));

        handler
            .handle(GenerateSpeechCommand {
                text: "poire".to_string(),
                language: Some("fr-FR".to_string()),
                voice: Some("fr-FR-DeniseNeural".to_string()),
            })
            .await
            .unwrap();

        let voices: Vec<String> = engine.calls().into_iter().map(|c| c.voice).collect();
        assert_eq!(voices, vec![DEFAULT_FR_VOICE, "fr-FR-DeniseNeural"]);
    }

    #[tokio::test]
    async fn test_generate_rejects_empty_text() {
        let dir = tempdir().unwrap();
        let engine = fake_engine();
        let storage = Arc::new(FileAudioStorage::new(dir.path()).await.unwrap());
        let handler = GenerateSpeechHandler::new(engine.clone(), storage);

        let err = handler
            .handle(GenerateSpeechCommand::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Validation error: Text is required");
        assert_eq!(engine.call_count(), 0);
    }
}

//! Speech Context - Value Objects

use serde::{Deserialize, Serialize};

use super::SpeechError;

/// 默认语言
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// 英语默认音色
pub const DEFAULT_EN_VOICE: &str = "en-US-ChristopherNeural";

/// 法语默认音色
pub const DEFAULT_FR_VOICE: &str = "fr-FR-HenriNeural";

/// 待合成文本
///
/// 不变量: 非空（允许仅包含空白以外的任意字符）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechText(String);

impl SpeechText {
    pub fn new(text: impl Into<String>) -> Result<Self, SpeechError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SpeechText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 音色名称，例如 `en-US-AriaNeural`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceName(String);

impl VoiceName {
    pub fn new(name: impl Into<String>) -> Result<Self, SpeechError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SpeechError::InvalidVoice("音色名称不能为空".to_string()));
        }
        if name.len() > 100 {
            return Err(SpeechError::InvalidVoice(
                "音色名称长度不能超过100字符".to_string(),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VoiceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 语言标识（locale），例如 `en-US`、`fr-FR`
///
/// 同时作为缓存文件名前缀，因此只允许字母、数字和 `-`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language(String);

impl Language {
    pub fn new(tag: impl Into<String>) -> Result<Self, SpeechError> {
        let tag = tag.into();
        let valid = !tag.is_empty()
            && tag.len() <= 35
            && tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(SpeechError::InvalidLanguage(tag));
        }
        Ok(Self(tag))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 该语言的默认音色
    pub fn default_voice(&self) -> VoiceName {
        default_voice_for(self)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 未指定音色时按语言选择默认音色
///
/// 仅 `fr-FR` 使用法语音色，其余一律回落到英语音色
pub fn default_voice_for(language: &Language) -> VoiceName {
    let name = if language.as_str() == "fr-FR" {
        DEFAULT_FR_VOICE
    } else {
        DEFAULT_EN_VOICE
    };
    VoiceName(name.to_string())
}

/// 生成缓存音频文件名
///
/// `{language}_{md5(text)}.mp3`，相同语言和文本总是映射到同一文件
pub fn audio_file_name(language: &Language, text: &SpeechText) -> String {
    let digest = md5::compute(text.as_str().as_bytes());
    format!("{}_{:x}.mp3", language, digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_text_rejects_blank() {
        assert_eq!(SpeechText::new(""), Err(SpeechError::EmptyText));
        assert_eq!(SpeechText::new("   "), Err(SpeechError::EmptyText));
        assert_eq!(SpeechText::new("Hello").unwrap().as_str(), "Hello");
    }

    #[test]
    fn test_voice_name_validation() {
        assert!(VoiceName::new("en-US-AriaNeural").is_ok());
        assert!(VoiceName::new("").is_err());
        assert!(VoiceName::new("x".repeat(101)).is_err());
    }

    #[test]
    fn test_language_validation() {
        assert!(Language::new("fr-FR").is_ok());
        assert!(Language::new("").is_err());
        assert!(Language::new("../etc").is_err());
        assert_eq!(Language::default().as_str(), "en-US");
    }

    #[test]
    fn test_default_voice_for_language() {
        let fr = Language::new("fr-FR").unwrap();
        let de = Language::new("de-DE").unwrap();
        assert_eq!(fr.default_voice().as_str(), DEFAULT_FR_VOICE);
        assert_eq!(de.default_voice().as_str(), DEFAULT_EN_VOICE);
        assert_eq!(Language::default().default_voice().as_str(), DEFAULT_EN_VOICE);
    }

    #[test]
    fn test_audio_file_name_is_stable() {
        let lang = Language::default();
        let text = SpeechText::new("Hello world").unwrap();
        let name = audio_file_name(&lang, &text);

        assert_eq!(name, audio_file_name(&lang, &text));
        assert!(name.starts_with("en-US_"));
        assert!(name.ends_with(".mp3"));
        // md5 的十六进制长度
        assert_eq!(name.len(), "en-US_".len() + 32 + ".mp3".len());

        let other = SpeechText::new("Hello World").unwrap();
        assert_ne!(name, audio_file_name(&lang, &other));
    }

    #[test]
    fn test_audio_file_name_differs_by_language() {
        let text = SpeechText::new("bonjour").unwrap();
        let en = audio_file_name(&Language::default(), &text);
        let fr = audio_file_name(&Language::new("fr-FR").unwrap(), &text);
        assert_ne!(en, fr);
    }
}

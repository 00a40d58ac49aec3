//! Speech Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpeechError {
    #[error("Text is required")]
    EmptyText,

    #[error("无效的音色名称: {0}")]
    InvalidVoice(String),

    #[error("无效的语言标识: {0}")]
    InvalidLanguage(String),
}

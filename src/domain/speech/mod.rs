//! Speech Context - 语音合成限界上下文
//!
//! 职责:
//! - 文本 / 音色 / 语言值对象
//! - 默认音色选择
//! - 缓存音频文件命名

mod errors;
mod value_objects;

pub use errors::SpeechError;
pub use value_objects::{
    audio_file_name, default_voice_for, Language, SpeechText, VoiceName, DEFAULT_EN_VOICE,
    DEFAULT_FR_VOICE, DEFAULT_LANGUAGE,
};

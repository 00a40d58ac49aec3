//! Speech Commands - 语音合成相关命令

use std::path::PathBuf;

/// 合成并保存到指定文件
#[derive(Debug, Clone)]
pub struct SaveSpeechCommand {
    pub text: String,
    pub voice: String,
    pub output_path: PathBuf,
}

/// 保存结果
#[derive(Debug, Clone)]
pub struct SavedSpeech {
    pub output_path: PathBuf,
    pub size_bytes: usize,
    pub audio_format: String,
}

/// 生成（带缓存）到输出目录
#[derive(Debug, Clone, Default)]
pub struct GenerateSpeechCommand {
    pub text: String,
    /// 缺省为 `en-US`
    pub language: Option<String>,
    /// 缺省或空字符串时按语言选择默认音色
    pub voice: Option<String>,
}

/// 生成结果
#[derive(Debug, Clone)]
pub struct GeneratedSpeech {
    pub audio_url: String,
    pub text: String,
    pub language: String,
    pub cached: bool,
    /// 实际使用的音色；缓存命中时为 None
    pub voice: Option<String>,
}

//! CLI Runner - `edge-speak <text> <voice> <output_file>`
//!
//! 参数不足时打印用法并正常返回（退出码 0）；
//! 合成或写文件失败时原样向上返回，由 main 以非零退出码结束进程

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::application::{ApplicationError, SaveSpeechCommand, SaveSpeechHandler, SavedSpeech};
use crate::application::ports::TtsEnginePort;
use crate::config::{AppConfig, ConfigError};

/// 用法说明
pub const USAGE: &str = "Usage: edge-speak <text> <voice> <output_file>";

/// CLI 错误
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("Failed to write to stdout: {0}")]
    Io(#[from] std::io::Error),
}

/// 三个位置参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeakArgs {
    pub text: String,
    pub voice: String,
    pub output_file: String,
}

/// 运行结果
#[derive(Debug)]
pub enum CliOutcome {
    /// 参数不足，已打印用法
    Usage,
    /// 音频已保存
    Saved(SavedSpeech),
}

/// 解析位置参数（不含程序名）
///
/// 少于三个返回 None；第三个之后的参数被忽略
pub fn parse_args<I>(args: I) -> Option<SpeakArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let text = args.next()?;
    let voice = args.next()?;
    let output_file = args.next()?;
    Some(SpeakArgs {
        text,
        voice,
        output_file,
    })
}

/// 决定本次运行使用的配置
///
/// 参数不足时只会打印用法，配置加载失败也回落到默认值，保证退出码为 0
pub fn config_for_args(
    args: &[String],
    loaded: Result<AppConfig, ConfigError>,
) -> Result<AppConfig, ConfigError> {
    match loaded {
        Ok(config) => Ok(config),
        Err(_) if parse_args(args.iter().cloned()).is_none() => Ok(AppConfig::default()),
        Err(e) => Err(e),
    }
}

/// 执行一次命令行调用
///
/// 顺序: 校验参数 -> 合成并保存 -> 打印确认
pub async fn run<I, W>(
    args: I,
    tts_engine: Arc<dyn TtsEnginePort>,
    out: &mut W,
) -> Result<CliOutcome, CliError>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    let Some(speak_args) = parse_args(args) else {
        writeln!(out, "{}", USAGE)?;
        return Ok(CliOutcome::Usage);
    };

    let handler = SaveSpeechHandler::new(tts_engine);
    let saved = handler
        .handle(SaveSpeechCommand {
            text: speak_args.text,
            voice: speak_args.voice,
            output_path: PathBuf::from(&speak_args.output_file),
        })
        .await?;

    writeln!(out, "Audio saved to {}", speak_args.output_file)?;

    Ok(CliOutcome::Saved(saved))
}

//! edge-speak - 命令行文字转语音
//!
//! `edge-speak <text> <voice> <output_file>`
//!
//! 参数不足时打印用法并以 0 退出；合成失败时以非零退出码结束

use edge_speak::config::load_config;
use edge_speak::infrastructure::bootstrap::{create_tts_engine, init_logging};
use edge_speak::infrastructure::cli::{self, CliOutcome};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = cli::config_for_args(&args, load_config())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config.log);

    let tts_engine = create_tts_engine(&config.tts);
    tracing::debug!(engine = tts_engine.name(), "TTS engine ready");

    let mut stdout = std::io::stdout();
    match cli::run(args, tts_engine, &mut stdout).await? {
        CliOutcome::Usage => tracing::debug!("Not enough arguments, usage printed"),
        CliOutcome::Saved(saved) => tracing::debug!(
            path = %saved.output_path.display(),
            size_bytes = saved.size_bytes,
            "Speech saved"
        ),
    }

    Ok(())
}

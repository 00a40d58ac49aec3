//! edge-speak-server - 带缓存的文字转语音 HTTP 服务
//!
//! - POST /generate-tts        单条生成
//! - POST /batch-generate-tts  批量生成（后台分批）
//! - GET  /batch-status/{id}   批量进度
//! - GET  /output/{file}       音频文件

use std::sync::Arc;
use std::time::Duration;

use edge_speak::config::{load_config, print_config};
use edge_speak::infrastructure::adapters::FileAudioStorage;
use edge_speak::infrastructure::bootstrap::{create_tts_engine, init_logging};
use edge_speak::infrastructure::http::{AppState, HttpServer};
use edge_speak::infrastructure::memory::InMemoryBatchTracker;
use edge_speak::infrastructure::worker::{BatchWorker, BatchWorkerConfig};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_logging(&config.log);

    tracing::info!("edge-speak server v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    // 输出目录（不存在时创建）
    let storage = Arc::new(FileAudioStorage::new(&config.storage.output_dir).await?);

    let tts_engine = create_tts_engine(&config.tts);

    // 批量任务队列
    let (queue_tx, queue_rx) = mpsc::channel(config.batch.queue_capacity);
    let batch_tracker = Arc::new(InMemoryBatchTracker::with_retention(
        queue_tx,
        Duration::from_secs(config.batch.retention_secs),
    ));

    let state = AppState::new(
        tts_engine,
        storage,
        batch_tracker.clone(),
        config.batch.default_size,
    );

    // Worker 与 HTTP 层共用同一个 GenerateSpeechHandler
    let worker = BatchWorker::new(
        BatchWorkerConfig {
            max_concurrent_jobs: config.batch.max_concurrent_jobs,
            pause_between_batches: Duration::from_millis(config.batch.pause_ms),
        },
        queue_rx,
        batch_tracker,
        state.generate_handler.clone(),
    );
    tokio::spawn(worker.run());

    let server = HttpServer::new(
        config.server.clone(),
        config.storage.output_dir.clone(),
        state,
    );

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

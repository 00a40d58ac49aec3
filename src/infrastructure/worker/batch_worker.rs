//! Batch Worker - Background Batch Generation Processor

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::mpsc;

use crate::application::commands::GenerateSpeechCommand;
use crate::application::ports::{BatchItemResult, BatchTrackerPort};
use crate::application::GenerateSpeechHandler;

/// Worker 配置
#[derive(Debug, Clone)]
pub struct BatchWorkerConfig {
    /// 同时处理的批量任务数
    pub max_concurrent_jobs: usize,
    /// 两批之间的停顿
    pub pause_between_batches: Duration,
}

impl Default for BatchWorkerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_jobs: 2,
            pause_between_batches: Duration::from_millis(500),
        }
    }
}

/// 批量生成 Worker
///
/// 从队列消费 batch_id，按 batch_size 分批：批内并发，批间串行
pub struct BatchWorker {
    config: BatchWorkerConfig,
    queue_receiver: mpsc::Receiver<String>,
    batch_tracker: Arc<dyn BatchTrackerPort>,
    generate_handler: Arc<GenerateSpeechHandler>,
}

impl BatchWorker {
    pub fn new(
        config: BatchWorkerConfig,
        queue_receiver: mpsc::Receiver<String>,
        batch_tracker: Arc<dyn BatchTrackerPort>,
        generate_handler: Arc<GenerateSpeechHandler>,
    ) -> Self {
        Self {
            config,
            queue_receiver,
            batch_tracker,
            generate_handler,
        }
    }

    /// 启动 Worker，队列关闭后返回
    pub async fn run(mut self) {
        tracing::info!(
            max_concurrent_jobs = self.config.max_concurrent_jobs,
            "BatchWorker started"
        );

        // 使用 semaphore 控制并发
        let semaphore = Arc::new(tokio::sync::Semaphore::new(
            self.config.max_concurrent_jobs.max(1),
        ));

        while let Some(batch_id) = self.queue_receiver.recv().await {
            let permit = match semaphore.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => {
                    tracing::error!("Failed to acquire semaphore permit");
                    continue;
                }
            };

            let batch_tracker = self.batch_tracker.clone();
            let generate_handler = self.generate_handler.clone();
            let pause = self.config.pause_between_batches;

            tokio::spawn(async move {
                let _permit = permit; // 持有 permit 直到任务完成
                Self::process_batch(&batch_id, batch_tracker, generate_handler, pause).await;
            });
        }

        tracing::info!("BatchWorker stopped");
    }

    /// 处理单个批量任务
    pub async fn process_batch(
        batch_id: &str,
        batch_tracker: Arc<dyn BatchTrackerPort>,
        generate_handler: Arc<GenerateSpeechHandler>,
        pause: Duration,
    ) {
        let job = match batch_tracker.get(batch_id) {
            Some(job) => job,
            None => {
                tracing::warn!(batch_id = %batch_id, "Batch not found, skipping");
                return;
            }
        };

        let pending_total = job.pending_texts.len();
        let chunks: Vec<Vec<String>> = job
            .pending_texts
            .chunks(job.batch_size.max(1))
            .map(|chunk| chunk.to_vec())
            .collect();
        let chunk_count = chunks.len();
        let mut processed = 0usize;

        for (index, chunk) in chunks.into_iter().enumerate() {
            let futures = chunk.into_iter().map(|text| {
                let handler = generate_handler.clone();
                let cmd = GenerateSpeechCommand {
                    text: text.clone(),
                    language: Some(job.language.to_string()),
                    voice: job.voice.clone(),
                };
                async move {
                    match handler.handle(cmd).await {
                        Ok(generated) => {
                            BatchItemResult::generated(text, generated.audio_url, generated.cached)
                        }
                        Err(e) => {
                            tracing::warn!(batch_id = %batch_id, error = %e, "Batch item failed");
                            BatchItemResult::failed(text, e.to_string())
                        }
                    }
                }
            });

            let results = join_all(futures).await;
            processed += results.len();

            if let Err(e) = batch_tracker.record_results(batch_id, results) {
                tracing::error!(batch_id = %batch_id, error = %e, "Failed to record batch results");
                return;
            }

            tracing::info!(
                batch_id = %batch_id,
                progress = %format!("{}/{}", processed, pending_total),
                "Batch progress"
            );

            if index + 1 < chunk_count && !pause.is_zero() {
                tokio::time::sleep(pause).await;
            }
        }

        if let Err(e) = batch_tracker.complete(batch_id) {
            tracing::error!(batch_id = %batch_id, error = %e, "Failed to complete batch");
            return;
        }

        tracing::info!(
            batch_id = %batch_id,
            generated = processed,
            "Batch generation completed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{BatchJob, BatchState};
    use crate::domain::speech::Language;
    use crate::infrastructure::adapters::{FakeTtsClient, FileAudioStorage};
    use crate::infrastructure::memory::InMemoryBatchTracker;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_process_batch_records_successes_and_failures() {
        let dir = tempdir().unwrap();
        let engine = Arc::new(FakeTtsClient::with_defaults());
        let storage = Arc::new(FileAudioStorage::new(dir.path()).await.unwrap());
        let handler = Arc::new(GenerateSpeechHandler::new(engine.clone(), storage));
        let (tx, _rx) = mpsc::channel(4);
        let tracker = Arc::new(InMemoryBatchTracker::new(tx));

        let texts = vec!["one", "", "two", "three", "four"];
        let job = BatchJob::new(
            Language::default(),
            None,
            2,
            texts.iter().map(|t| t.to_string()).collect(),
            vec![],
        );
        let batch_id = tracker.submit(job).await.unwrap();

        BatchWorker::process_batch(&batch_id, tracker.clone(), handler, Duration::ZERO).await;

        let job = tracker.get(&batch_id).unwrap();
        assert_eq!(job.state, BatchState::Completed);
        assert_eq!(job.completed(), 5);
        assert_eq!(job.failed(), 1);
        assert!(job.pending_texts.is_empty());

        let failed = job.results.iter().find(|r| !r.success).unwrap();
        assert_eq!(failed.text, "");
        assert_eq!(
            failed.error.as_deref(),
            Some("Validation error: Text is required")
        );
        // 空文本不会调用引擎
        assert_eq!(engine.call_count(), 4);
    }

    #[tokio::test]
    async fn test_run_consumes_queue() {
        let dir = tempdir().unwrap();
        let engine = Arc::new(FakeTtsClient::with_defaults());
        let storage = Arc::new(FileAudioStorage::new(dir.path()).await.unwrap());
        let handler = Arc::new(GenerateSpeechHandler::new(engine.clone(), storage));
        let (tx, rx) = mpsc::channel(4);
        let tracker = Arc::new(InMemoryBatchTracker::new(tx));

        let worker = BatchWorker::new(
            BatchWorkerConfig {
                max_concurrent_jobs: 1,
                pause_between_batches: Duration::ZERO,
            },
            rx,
            tracker.clone(),
            handler,
        );
        let worker_handle = tokio::spawn(worker.run());

        let job = BatchJob::new(
            Language::default(),
            Some("en-US-AriaNeural".to_string()),
            5,
            vec!["alpha".to_string(), "beta".to_string()],
            vec![],
        );
        let batch_id = tracker.submit(job).await.unwrap();

        let mut done = false;
        for _ in 0..100 {
            if tracker.get(&batch_id).map(|j| j.state) == Some(BatchState::Completed) {
                done = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert!(done, "batch did not complete");
        assert!(engine
            .calls()
            .iter()
            .all(|c| c.voice == "en-US-AriaNeural"));

        worker_handle.abort();
    }
}

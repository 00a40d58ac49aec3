//! Batch Command Handlers

use std::sync::Arc;

use crate::application::commands::batch_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::{AudioStoragePort, BatchItemResult, BatchJob, BatchTrackerPort};
use crate::domain::speech::{audio_file_name, Language, SpeechText};

/// BatchGenerate Handler - 提交批量生成
///
/// 缓存命中的文本立即返回，其余文本登记为批量任务交给后台 worker
pub struct BatchGenerateHandler {
    storage: Arc<dyn AudioStoragePort>,
    batch_tracker: Arc<dyn BatchTrackerPort>,
    default_batch_size: usize,
}

impl BatchGenerateHandler {
    pub fn new(
        storage: Arc<dyn AudioStoragePort>,
        batch_tracker: Arc<dyn BatchTrackerPort>,
        default_batch_size: usize,
    ) -> Self {
        Self {
            storage,
            batch_tracker,
            default_batch_size,
        }
    }

    pub async fn handle(
        &self,
        cmd: BatchGenerateCommand,
    ) -> Result<BatchGenerateResponse, ApplicationError> {
        if cmd.texts.is_empty() {
            return Err(ApplicationError::validation("Texts array is required"));
        }

        let batch_size = cmd.batch_size.unwrap_or(self.default_batch_size);
        if batch_size == 0 {
            return Err(ApplicationError::validation("batchSize must be at least 1"));
        }

        let language = match cmd.language {
            Some(tag) => Language::new(tag)?,
            None => Language::default(),
        };

        let total = cmd.texts.len();
        let mut cached_results = Vec::new();
        let mut pending_texts = Vec::new();

        for text in cmd.texts {
            // 无效文本也进入待生成队列，由 worker 记录为失败项
            let file_name = match SpeechText::new(text.as_str()) {
                Ok(speech_text) => audio_file_name(&language, &speech_text),
                Err(_) => {
                    pending_texts.push(text);
                    continue;
                }
            };

            if self.storage.exists(&file_name).await {
                let url = self.storage.public_url(&file_name);
                cached_results.push(BatchItemResult::generated(text, url, true));
            } else {
                pending_texts.push(text);
            }
        }

        let completed = cached_results.len();
        let pending = pending_texts.len();
        let message = format!(
            "Found {} cached audios, generating {} new audios",
            completed, pending
        );

        tracing::info!(
            language = %language,
            total = total,
            cached = completed,
            pending = pending,
            batch_size = batch_size,
            "Batch generation requested"
        );

        let batch_id = if pending > 0 {
            let job = BatchJob::new(
                language,
                cmd.voice,
                batch_size,
                pending_texts,
                cached_results.clone(),
            );
            Some(self.batch_tracker.submit(job).await?)
        } else {
            None
        };

        Ok(BatchGenerateResponse {
            batch_id,
            completed,
            total,
            results: cached_results,
            pending,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FileAudioStorage;
    use crate::infrastructure::memory::InMemoryBatchTracker;
    use tempfile::tempdir;
    use tokio::sync::mpsc;

    async fn setup(
        dir: &std::path::Path,
    ) -> (
        BatchGenerateHandler,
        Arc<FileAudioStorage>,
        Arc<InMemoryBatchTracker>,
        mpsc::Receiver<String>,
    ) {
        let storage = Arc::new(FileAudioStorage::new(dir).await.unwrap());
        let (tx, rx) = mpsc::channel(8);
        let tracker = Arc::new(InMemoryBatchTracker::new(tx));
        let handler = BatchGenerateHandler::new(storage.clone(), tracker.clone(), 5);
        (handler, storage, tracker, rx)
    }

    #[tokio::test]
    async fn test_rejects_empty_texts() {
        let dir = tempdir().unwrap();
        let (handler, _, _, _rx) = setup(dir.path()).await;

        let err = handler
            .handle(BatchGenerateCommand::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Texts array is required");
    }

    #[tokio::test]
    async fn test_rejects_zero_batch_size() {
        let dir = tempdir().unwrap();
        let (handler, _, _, _rx) = setup(dir.path()).await;

        let err = handler
            .handle(BatchGenerateCommand {
                texts: vec!["a".to_string()],
                batch_size: Some(0),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_splits_cached_and_pending() {
        let dir = tempdir().unwrap();
        let (handler, storage, tracker, mut rx) = setup(dir.path()).await;

        let lang = Language::default();
        let cached_name = audio_file_name(&lang, &SpeechText::new("apple").unwrap());
        storage.save(&cached_name, b"mp3").await.unwrap();

        let response = handler
            .handle(BatchGenerateCommand {
                texts: vec!["apple".to_string(), "banana".to_string(), "cherry".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(response.total, 3);
        assert_eq!(response.completed, 1);
        assert_eq!(response.pending, 2);
        assert_eq!(
            response.message,
            "Found 1 cached audios, generating 2 new audios"
        );
        assert_eq!(response.results[0].text, "apple");
        assert!(response.results[0].cached);

        let batch_id = response.batch_id.unwrap();
        assert_eq!(rx.recv().await.unwrap(), batch_id);

        let job = tracker.get(&batch_id).unwrap();
        assert_eq!(job.pending_texts, vec!["banana", "cherry"]);
        assert_eq!(job.batch_size, 5);
        assert_eq!(job.total, 3);
    }

    #[tokio::test]
    async fn test_all_cached_submits_nothing() {
        let dir = tempdir().unwrap();
        let (handler, storage, _, mut rx) = setup(dir.path()).await;

        let lang = Language::default();
        let name = audio_file_name(&lang, &SpeechText::new("apple").unwrap());
        storage.save(&name, b"mp3").await.unwrap();

        let response = handler
            .handle(BatchGenerateCommand {
                texts: vec!["apple".to_string()],
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(response.batch_id.is_none());
        assert_eq!(response.pending, 0);
        assert!(rx.try_recv().is_err());
    }
}

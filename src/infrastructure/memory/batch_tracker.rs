//! In-Memory Batch Tracker Implementation

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::mpsc::{self, error::TrySendError};

use crate::application::ports::{
    BatchError, BatchItemResult, BatchJob, BatchState, BatchTrackerPort,
};

/// 已完成任务的默认保留时长
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(3600);

/// 内存批量任务管理器
///
/// 进程重启后任务记录丢失，已生成的音频文件仍留在输出目录中。
/// 已完成的任务超过保留时长后，在下一次 submit 时清除
pub struct InMemoryBatchTracker {
    /// batch_id -> BatchJob
    jobs: DashMap<String, BatchJob>,
    /// 任务队列发送端
    queue_sender: mpsc::Sender<String>,
    retention: Duration,
}

impl InMemoryBatchTracker {
    pub fn new(queue_sender: mpsc::Sender<String>) -> Self {
        Self::with_retention(queue_sender, DEFAULT_RETENTION)
    }

    pub fn with_retention(queue_sender: mpsc::Sender<String>, retention: Duration) -> Self {
        Self {
            jobs: DashMap::new(),
            queue_sender,
            retention,
        }
    }

    /// 清除超过保留时长的已完成任务，返回清除数量
    pub fn evict_finished(&self) -> usize {
        let now = Utc::now();
        let retention = self.retention;
        let before = self.jobs.len();

        self.jobs.retain(|_, job| match job.finished_at {
            Some(finished_at) => (now - finished_at)
                .to_std()
                .map(|age| age < retention)
                .unwrap_or(true),
            None => true,
        });

        let evicted = before.saturating_sub(self.jobs.len());
        if evicted > 0 {
            tracing::debug!(evicted, "Finished batches evicted");
        }
        evicted
    }

    /// 当前登记的任务数
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[async_trait]
impl BatchTrackerPort for InMemoryBatchTracker {
    async fn submit(&self, job: BatchJob) -> Result<String, BatchError> {
        self.evict_finished();

        let batch_id = job.batch_id.clone();
        self.jobs.insert(batch_id.clone(), job);

        // 不等待队列空位，队列满或 worker 已退出时撤销登记
        if let Err(e) = self.queue_sender.try_send(batch_id.clone()) {
            self.jobs.remove(&batch_id);
            let reason = match e {
                TrySendError::Full(_) => "queue is full",
                TrySendError::Closed(_) => "worker has stopped",
            };
            tracing::warn!(batch_id = %batch_id, reason, "Failed to enqueue batch");
            return Err(BatchError::QueueUnavailable(reason.to_string()));
        }

        tracing::debug!(batch_id = %batch_id, "Batch submitted");
        Ok(batch_id)
    }

    fn get(&self, batch_id: &str) -> Option<BatchJob> {
        self.jobs.get(batch_id).map(|job| job.clone())
    }

    fn record_results(
        &self,
        batch_id: &str,
        results: Vec<BatchItemResult>,
    ) -> Result<(), BatchError> {
        let mut job = self
            .jobs
            .get_mut(batch_id)
            .ok_or_else(|| BatchError::NotFound(batch_id.to_string()))?;

        let done: Vec<&str> = results.iter().map(|r| r.text.as_str()).collect();
        // 按文本移除一次，保留重复文本的剩余条目
        let mut remaining = std::mem::take(&mut job.pending_texts);
        for text in done {
            if let Some(pos) = remaining.iter().position(|t| t == text) {
                remaining.remove(pos);
            }
        }
        job.pending_texts = remaining;
        job.results.extend(results);
        Ok(())
    }

    fn complete(&self, batch_id: &str) -> Result<(), BatchError> {
        let mut job = self
            .jobs
            .get_mut(batch_id)
            .ok_or_else(|| BatchError::NotFound(batch_id.to_string()))?;

        job.state = BatchState::Completed;
        job.finished_at = Some(Utc::now());
        Ok(())
    }
}

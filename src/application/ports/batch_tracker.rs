//! Batch Tracker Port - 批量生成任务管理
//!
//! 定义批量任务登记、入队和进度记录的抽象接口，具体实现在 infrastructure/memory 层

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::speech::Language;

/// Batch Tracker 错误
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Batch not found: {0}")]
    NotFound(String),

    #[error("Batch queue unavailable: {0}")]
    QueueUnavailable(String),
}

/// 批量任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchState {
    /// 仍有文本等待生成
    Running,
    /// 所有文本已处理（可能包含失败项）
    Completed,
}

impl BatchState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchState::Running => "running",
            BatchState::Completed => "completed",
        }
    }
}

/// 单条文本的生成结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItemResult {
    pub text: String,
    pub success: bool,
    pub audio_url: Option<String>,
    pub cached: bool,
    pub error: Option<String>,
}

impl BatchItemResult {
    pub fn generated(text: impl Into<String>, audio_url: impl Into<String>, cached: bool) -> Self {
        Self {
            text: text.into(),
            success: true,
            audio_url: Some(audio_url.into()),
            cached,
            error: None,
        }
    }

    pub fn failed(text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
            audio_url: None,
            cached: false,
            error: Some(error.into()),
        }
    }
}

/// 批量生成任务
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub batch_id: String,
    pub language: Language,
    pub voice: Option<String>,
    pub batch_size: usize,
    /// 尚未生成的文本（按提交顺序）
    pub pending_texts: Vec<String>,
    /// 已完成的结果（缓存命中项在创建时即写入）
    pub results: Vec<BatchItemResult>,
    pub total: usize,
    pub state: BatchState,
    pub created_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl BatchJob {
    pub fn new(
        language: Language,
        voice: Option<String>,
        batch_size: usize,
        pending_texts: Vec<String>,
        cached_results: Vec<BatchItemResult>,
    ) -> Self {
        let total = pending_texts.len() + cached_results.len();
        Self {
            batch_id: Uuid::new_v4().to_string(),
            language,
            voice,
            batch_size,
            pending_texts,
            results: cached_results,
            total,
            state: BatchState::Running,
            created_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn completed(&self) -> usize {
        self.results.len()
    }

    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }
}

/// Batch Tracker Port
///
/// - submit: 登记任务并投递到后台 worker 队列
/// - record_results: worker 每处理完一批调用一次
#[async_trait]
pub trait BatchTrackerPort: Send + Sync {
    /// 登记并入队，返回 batch_id
    async fn submit(&self, job: BatchJob) -> Result<String, BatchError>;

    /// 获取任务快照
    fn get(&self, batch_id: &str) -> Option<BatchJob>;

    /// 追加一批结果
    fn record_results(
        &self,
        batch_id: &str,
        results: Vec<BatchItemResult>,
    ) -> Result<(), BatchError>;

    /// 标记任务完成
    fn complete(&self, batch_id: &str) -> Result<(), BatchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_job_counts_cached_results() {
        let job = BatchJob::new(
            Language::default(),
            None,
            5,
            vec!["b".to_string(), "c".to_string()],
            vec![BatchItemResult::generated("a", "/output/a.mp3", true)],
        );

        assert_eq!(job.total, 3);
        assert_eq!(job.completed(), 1);
        assert_eq!(job.failed(), 0);
        assert_eq!(job.state, BatchState::Running);
        assert!(job.finished_at.is_none());
    }

    #[test]
    fn test_failed_count() {
        let mut job = BatchJob::new(Language::default(), None, 2, vec![], vec![]);
        job.results.push(BatchItemResult::failed("x", "boom"));
        job.results.push(BatchItemResult::generated("y", "/output/y.mp3", false));
        assert_eq!(job.failed(), 1);
        assert_eq!(job.completed(), 2);
    }
}

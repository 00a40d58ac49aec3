//! Data Transfer Objects
//!
//! 字段使用 camelCase，与前端约定一致

use serde::{Deserialize, Serialize};

use crate::application::{BatchGenerateResponse, BatchItemResult, BatchJob, GeneratedSpeech};

// ============================================================================
// Generate DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateTtsRequest {
    #[serde(default)]
    pub text: String,
    pub language: Option<String>,
    pub voice: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTtsResponse {
    pub success: bool,
    pub audio_url: String,
    pub text: String,
    pub language: String,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

impl From<GeneratedSpeech> for GenerateTtsResponse {
    fn from(g: GeneratedSpeech) -> Self {
        Self {
            success: true,
            audio_url: g.audio_url,
            text: g.text,
            language: g.language,
            cached: g.cached,
            voice: g.voice,
        }
    }
}

// ============================================================================
// Batch DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGenerateTtsRequest {
    #[serde(default)]
    pub texts: Vec<String>,
    pub language: Option<String>,
    pub voice: Option<String>,
    pub batch_size: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemDto {
    pub success: bool,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<BatchItemResult> for BatchItemDto {
    fn from(r: BatchItemResult) -> Self {
        Self {
            success: r.success,
            text: r.text,
            audio_url: r.audio_url,
            cached: r.cached,
            error: r.error,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGenerateTtsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    pub completed: usize,
    pub total: usize,
    pub results: Vec<BatchItemDto>,
    pub pending: usize,
    pub message: String,
}

impl From<BatchGenerateResponse> for BatchGenerateTtsResponse {
    fn from(r: BatchGenerateResponse) -> Self {
        Self {
            success: true,
            batch_id: r.batch_id,
            completed: r.completed,
            total: r.total,
            results: r.results.into_iter().map(BatchItemDto::from).collect(),
            pending: r.pending,
            message: r.message,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatusResponse {
    pub success: bool,
    pub batch_id: String,
    pub state: String,
    pub language: String,
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub pending: usize,
    pub results: Vec<BatchItemDto>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
}

impl From<BatchJob> for BatchStatusResponse {
    fn from(job: BatchJob) -> Self {
        Self {
            success: true,
            state: job.state.as_str().to_string(),
            language: job.language.to_string(),
            total: job.total,
            completed: job.completed(),
            failed: job.failed(),
            pending: job.pending_texts.len(),
            created_at: job.created_at.to_rfc3339(),
            finished_at: job.finished_at.map(|t| t.to_rfc3339()),
            results: job.results.into_iter().map(BatchItemDto::from).collect(),
            batch_id: job.batch_id,
        }
    }
}

//! Batch Handlers - 批量生成与进度查询

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{BatchGenerateCommand, GetBatchStatus};
use crate::infrastructure::http::dto::{
    BatchGenerateTtsRequest, BatchGenerateTtsResponse, BatchStatusResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Batch Generate
// ============================================================================

pub async fn batch_generate_tts(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BatchGenerateTtsRequest>,
) -> Result<Json<BatchGenerateTtsResponse>, ApiError> {
    let cmd = BatchGenerateCommand {
        texts: req.texts,
        language: req.language,
        voice: req.voice,
        batch_size: req.batch_size,
    };

    let result = state.batch_generate_handler.handle(cmd).await?;

    Ok(Json(result.into()))
}

// ============================================================================
// Batch Status
// ============================================================================

pub async fn batch_status(
    State(state): State<Arc<AppState>>,
    Path(batch_id): Path<String>,
) -> Result<Json<BatchStatusResponse>, ApiError> {
    let job = state
        .batch_status_handler
        .handle(GetBatchStatus { batch_id })?;

    Ok(Json(job.into()))
}

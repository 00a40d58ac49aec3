//! Speech Handlers - 单条生成

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::GenerateSpeechCommand;
use crate::infrastructure::http::dto::{GenerateTtsRequest, GenerateTtsResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

pub async fn generate_tts(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateTtsRequest>,
) -> Result<Json<GenerateTtsResponse>, ApiError> {
    let cmd = GenerateSpeechCommand {
        text: req.text,
        language: req.language,
        voice: req.voice,
    };

    let result = state.generate_handler.handle(cmd).await?;

    Ok(Json(result.into()))
}

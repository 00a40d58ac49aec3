//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                  GET   健康检查
//! - /generate-tts              POST  生成单条音频（带缓存）
//! - /batch-generate-tts        POST  批量生成（缓存项立即返回，其余后台生成）
//! - /batch-status/{batch_id}   GET   查询批量任务进度
//! - /output/{file}             GET   已生成的音频文件

use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(output_dir: &Path) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/ping", get(handlers::ping))
        .route("/generate-tts", post(handlers::generate_tts))
        .route("/batch-generate-tts", post(handlers::batch_generate_tts))
        .route("/batch-status/:batch_id", get(handlers::batch_status))
        .nest_service("/output", ServeDir::new(output_dir))
}

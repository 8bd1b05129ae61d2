//! GET /api/progress - poll pipeline progress by session id.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::kernel::progress::PipelineStage;
use crate::server::app::AppState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressQuery {
    pub session_id: String,
}

#[derive(Serialize)]
pub struct ProgressBody {
    pub stage: PipelineStage,
    pub message: String,
    pub percent: u8,
}

#[derive(Serialize)]
pub struct NotFoundBody {
    pub error: String,
}

pub async fn progress_handler(
    State(state): State<AppState>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ProgressBody>, (StatusCode, Json<NotFoundBody>)> {
    match state.deps.progress.read(&query.session_id) {
        Some(progress) => Ok(Json(ProgressBody {
            stage: progress.stage,
            message: progress.message,
            percent: progress.percent,
        })),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(NotFoundBody {
                error: "unknown session".to_string(),
            }),
        )),
    }
}

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    search_tiers: usize,
}

/// Health check endpoint
///
/// Reports liveness and how many research tiers are configured. Returns
/// 200 even with zero tiers: the pipeline still works in degraded mode.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            search_tiers: state.deps.searcher.tier_count(),
        }),
    )
}

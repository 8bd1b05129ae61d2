//! POST /api/generate - run the plan pipeline for one request.

use axum::{extract::State, http::HeaderMap, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::pipeline::types::ChannelSnapshot;
use crate::pipeline::{GenerateRequest, GenerationError};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBody {
    #[serde(default)]
    pub channel_name: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub channel_bio: Option<String>,
    #[serde(default)]
    pub channel_analytics: Option<serde_json::Value>,
    #[serde(default)]
    pub remix_analytics: Option<serde_json::Value>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeBody {
    pub error: String,
    pub message: String,
    pub show_upgrade: bool,
    pub upgrade_url: String,
    pub benefits: Vec<String>,
}

pub async fn generate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<GenerateBody>,
) -> axum::response::Response {
    // Authentication is an external collaborator; we consume its header.
    let user_id = match headers.get("x-user-id").and_then(|v| v.to_str().ok()) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(ErrorBody {
                    error: "unauthenticated".to_string(),
                    details: None,
                }),
            )
                .into_response();
        }
    };

    if body.channel_name.trim().is_empty()
        || body.topic.trim().is_empty()
        || body.session_id.trim().is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "channelName, topic and sessionId are required".to_string(),
                details: None,
            }),
        )
            .into_response();
    }

    let request = GenerateRequest {
        user_id,
        session_id: body.session_id.clone(),
        channel_name: body.channel_name.clone(),
        topic: body.topic.clone(),
        channel: snapshot_from_body(&body),
    };

    // Over HTTP, abort happens by future-drop: a dropped connection drops
    // this handler and the pipeline future with it. The token is the
    // library-level abort seam for embedders driving the generator
    // directly; nothing cancels it on this path.
    let cancel = CancellationToken::new();

    match state.generator.generate(request, cancel).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(GenerationError::QuotaExceeded {
            message,
            upgrade_url,
            benefits,
        }) => (
            StatusCode::FORBIDDEN,
            Json(UpgradeBody {
                error: "quota_exceeded".to_string(),
                message,
                show_upgrade: true,
                upgrade_url,
                benefits,
            }),
        )
            .into_response(),
        Err(GenerationError::DuplicateRequest) => (
            StatusCode::CONFLICT,
            Json(ErrorBody {
                error: "an identical request is already running".to_string(),
                details: None,
            }),
        )
            .into_response(),
        // Cancellation is not an error; there is nobody left to answer.
        Err(GenerationError::Cancelled) => StatusCode::NO_CONTENT.into_response(),
        Err(GenerationError::Timeout) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "generation_timeout".to_string(),
                details: Some("The pipeline exceeded its time limit".to_string()),
            }),
        )
            .into_response(),
        Err(GenerationError::GateFailure(e)) => {
            tracing::error!(error = %e, "quota gate failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "internal_error".to_string(),
                    details: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}

/// Assemble the channel snapshot the classifier sees from the request
/// body (the metadata fetcher upstream of us already did the real work).
fn snapshot_from_body(body: &GenerateBody) -> ChannelSnapshot {
    let analytics = body.channel_analytics.as_ref();
    let number = |key: &str| -> u64 {
        analytics
            .and_then(|a| a.get(key))
            .and_then(|v| v.as_u64())
            .unwrap_or(0)
    };
    let recent_videos = analytics
        .and_then(|a| a.get("recentVideos"))
        .and_then(|v| v.as_array())
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    ChannelSnapshot {
        name: body.channel_name.clone(),
        description: body.channel_bio.clone().unwrap_or_default(),
        recent_videos,
        subscriber_count: number("subscriberCount"),
        view_count: number("viewCount"),
        video_count: number("videoCount"),
    }
}

/// Analytics event endpoints
///
/// The dashboard reports view/click/download interactions here; counts
/// feed the "popular workflows" panel. Events live in the cache database,
/// so these are the only routes that require one to be configured.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::workflows::AppState;

/// Event kinds the dashboard may report
const EVENT_TYPES: &[&str] = &["view", "click", "download"];

/// Request body for event logging
#[derive(Debug, Deserialize)]
pub struct LogEventRequest {
    pub workflow_id: String,
    pub event_type: String,
    #[serde(default)]
    pub metadata: Value,
}

/// Create analytics routes
pub fn create_analytics_routes() -> Router<AppState> {
    Router::new()
        .route("/api/analytics", post(log_event))
        .route("/api/analytics/stats", get(view_stats))
}

/// Record a single analytics event
///
/// POST /api/analytics
/// Body: { "workflow_id": "...", "event_type": "view", "metadata": {...} }
async fn log_event(
    State(state): State<AppState>,
    Json(payload): Json<LogEventRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if !EVENT_TYPES.contains(&payload.event_type.as_str()) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({
                "success": false,
                "error": format!("Unknown event type: {}", payload.event_type),
                "timestamp": Utc::now(),
            })),
        ));
    }

    let store = state.provider.store().ok_or_else(analytics_unavailable)?;

    match store
        .log_event(&payload.workflow_id, &payload.event_type, &payload.metadata)
        .await
    {
        Ok(()) => Ok(Json(json!({
            "success": true,
            "timestamp": Utc::now(),
        }))),
        Err(e) => {
            tracing::error!("❌ Failed to log analytics event: {:#}", e);
            Err(crate::api::workflows::error_envelope(&e))
        }
    }
}

/// Per-workflow view counts
///
/// GET /api/analytics/stats
async fn view_stats(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let store = state.provider.store().ok_or_else(analytics_unavailable)?;

    match store.view_counts().await {
        Ok(counts) => Ok(Json(json!({
            "success": true,
            "data": counts,
            "timestamp": Utc::now(),
        }))),
        Err(e) => {
            tracing::error!("❌ Failed to load analytics stats: {:#}", e);
            Err(crate::api::workflows::error_envelope(&e))
        }
    }
}

/// Error response when no cache database is configured
fn analytics_unavailable() -> (StatusCode, Json<Value>) {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "success": false,
            "error": "Analytics requires a configured cache database",
            "timestamp": Utc::now(),
        })),
    )
}

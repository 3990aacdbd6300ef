/// Workflow listing and refresh endpoints
///
/// GET /api/workflows composes the cache pipeline with the galaxy layout
/// and wraps the result in a uniform envelope. POST /api/workflows forces
/// a blocking cache refresh. Every failure surfaces as the same
/// `{success: false, error, timestamp}` shape with a 500 status.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::cache::coordinator::WorkflowProvider;
use crate::galaxy::calculate_galaxy_positions;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Cache-or-fetch coordinator for workflow metadata
    pub provider: Arc<WorkflowProvider>,
}

/// Create workflow listing routes
pub fn create_workflow_routes() -> Router<AppState> {
    Router::new()
        .route("/api/workflows", get(list_workflows))
        .route("/api/workflows", post(refresh_workflows))
}

/// List all workflows with galaxy positions
///
/// GET /api/workflows
/// Returns: { "success": true, "data": [...], "count": n, "source": "...",
///            "cacheConnected": bool, "timestamp": "..." }
async fn list_workflows(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.provider.get_workflows().await {
        Ok((workflows, source)) => {
            let positioned = calculate_galaxy_positions(workflows);
            let count = positioned.len();

            Ok(Json(json!({
                "success": true,
                "data": positioned,
                "count": count,
                "source": source,
                "cacheConnected": state.provider.cache_connected(),
                "timestamp": Utc::now(),
            })))
        }
        Err(e) => {
            tracing::error!("❌ Failed to fetch workflows: {:#}", e);
            Err(error_envelope(&e))
        }
    }
}

/// Manually refresh the workflow cache
///
/// POST /api/workflows
/// Always hits GitHub, and the cache write is awaited before responding,
/// so a success here means the cache is actually up to date.
async fn refresh_workflows(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.provider.refresh().await {
        Ok(count) => {
            tracing::info!("🔄 Manual cache refresh completed: {} workflows", count);
            Ok(Json(json!({
                "success": true,
                "message": "Cache refreshed",
                "count": count,
                "timestamp": Utc::now(),
            })))
        }
        Err(e) => {
            tracing::error!("❌ Manual cache refresh failed: {:#}", e);
            Err(error_envelope(&e))
        }
    }
}

/// Uniform error envelope for unrecovered failures
pub(crate) fn error_envelope(error: &anyhow::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "success": false,
            "error": error.to_string(),
            "timestamp": Utc::now(),
        })),
    )
}

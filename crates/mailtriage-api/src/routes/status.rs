//! Service banner and health probe.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Plain-text banner served at `/`.
pub const BANNER: &str = "Backend active. Use /process, /process-file or /app.";

/// Response of `GET /health`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"ok"` when the service answers.
    pub status: String,
    /// Whether classification is backed by a remote model.
    pub model_loaded: bool,
}

/// Build the status router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
}

async fn index() -> &'static str {
    BANNER
}

/// GET /health: Service status.
///
/// Builds the classifier if no request has done so yet.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    ),
    tag = "status"
)]
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let backend = state.classifier().await;
    Json(HealthResponse {
        status: "ok".into(),
        model_loaded: backend.model_loaded(),
    })
}

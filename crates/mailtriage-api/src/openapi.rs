//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI document
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI document for the API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "mailtriage API",
        version = "0.1.0",
        description = "Classifies emails as productive or unproductive and suggests a reply.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::classify::process_text,
        crate::routes::classify::process_file,
        crate::routes::status::health,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::classify::ProcessTextRequest,
        crate::routes::classify::FileUpload,
        crate::routes::classify::ProcessResponse,
        crate::routes::status::HealthResponse,
    )),
    tags(
        (name = "classification", description = "Email classification and suggested replies"),
        (name = "status", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

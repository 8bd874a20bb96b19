//! Request origin logging.
//!
//! Logs the `Origin` header of every CORS preflight and of every call to
//! an API endpoint, which is what is needed to diagnose a front end
//! blocked by CORS.

use axum::extract::Request;
use axum::http::{header, Method};
use axum::middleware::Next;
use axum::response::Response;

const LOGGED_PATHS: &[&str] = &["/process", "/process-file", "/health"];

/// Middleware function logging request origins.
pub async fn log_origin(request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    let path = request.uri().path();

    if request.method() == Method::OPTIONS {
        tracing::info!(origin, path, "CORS preflight");
    } else if LOGGED_PATHS.contains(&path) {
        tracing::info!(origin, path, method = %request.method(), "API request");
    }

    next.run(request).await
}

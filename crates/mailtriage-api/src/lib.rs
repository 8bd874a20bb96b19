//! # mailtriage-api: Email Classification Service
//!
//! Classifies an email as productive (`Produtivo`) or unproductive
//! (`Improdutivo`) and suggests a reply. Input is either JSON text or an
//! uploaded `.txt`/`.pdf` file.
//!
//! ## API Surface
//!
//! | Route | Module | Purpose |
//! |-------|--------|---------|
//! | `GET /` | [`routes::status`] | Plain-text banner |
//! | `GET /health` | [`routes::status`] | Status and whether a remote model is in use |
//! | `POST /process` | [`routes::classify`] | Classify `{"text": ...}` |
//! | `POST /process-file` | [`routes::classify`] | Classify multipart part `file` |
//! | `GET /app`, `/app/*` | [`routes::frontend`] | Static front end |
//! | `GET /openapi.json` | [`openapi`] | OpenAPI document |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → origin logging → CORS → body limit → Handler
//! ```
//!
//! ## Backends
//!
//! Classification uses a Hugging Face zero-shot model when `HF_API_TOKEN`
//! is set and the keyword classifier otherwise. Replies come from OpenAI
//! when `OPENAI_API_KEY` is set and from canned replies otherwise. Remote
//! failures always fall back to the local implementation.

pub mod classifier;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod replies;
pub mod routes;
pub mod state;
pub mod upstream;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        .merge(routes::status::router())
        .merge(routes::classify::router())
        .merge(routes::frontend::router(&config.frontend_dir))
        .merge(openapi::router())
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(middleware::cors::layer(&config.frontend_origins))
        .layer(from_fn(middleware::origin_log::log_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

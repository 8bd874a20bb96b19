//! Static front end.
//!
//! `/app/` serves `index.html` from the configured directory and
//! `/app/<path>` the other files in it. `/app` redirects to `/app/` so the
//! page's relative asset URLs resolve under the prefix. When the directory
//! does not exist at startup all of them answer 404, as does `/favicon.ico`.

use std::path::Path;

use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::state::AppState;

/// Body of the 404 returned when no front end is deployed.
pub const FRONTEND_MISSING: &str = "frontend not found";

/// Build the front-end router for `dir`.
pub fn router(dir: &Path) -> Router<AppState> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "frontend directory not found");
        return Router::new()
            .route("/app", get(missing))
            .route("/app/*path", get(missing))
            .route("/favicon.ico", get(|| async { StatusCode::NOT_FOUND }));
    }

    // Nesting at "/app/" leaves bare "/app" free for the redirect.
    Router::new()
        .route("/app", get(|| async { Redirect::permanent("/app/") }))
        .nest_service("/app/", ServeDir::new(dir))
        .route_service("/favicon.ico", ServeFile::new(dir.join("favicon.ico")))
}

async fn missing() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, FRONTEND_MISSING)
}

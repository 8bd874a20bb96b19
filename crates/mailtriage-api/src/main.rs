//! # mailtriage-api: Binary Entry Point
//!
//! Loads `.env`, reads configuration from the environment and starts the
//! HTTP server on `127.0.0.1:5000`, or on `0.0.0.0:$PORT` when `PORT` is set.

use mailtriage_api::config::AppConfig;
use mailtriage_api::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is not an error.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().map_err(|e| {
        tracing::error!("Invalid configuration: {e}");
        e
    })?;

    tracing::info!(
        frontend_dir = %config.frontend_dir.display(),
        exists = config.frontend_dir.is_dir(),
        "frontend directory"
    );
    match &config.zero_shot {
        Some(zs) => tracing::info!(model = %zs.model, "zero-shot classification enabled"),
        None => tracing::info!("HF_API_TOKEN not set; using keyword classification"),
    }
    match &config.openai {
        Some(openai) => tracing::info!(model = %openai.model, "reply generation enabled"),
        None => tracing::warn!("OPENAI_API_KEY not set; using canned replies"),
    }

    let addr = config.socket_addr();
    let hosted = config.is_hosted();

    let state = AppState::new(config).map_err(|e| {
        tracing::error!("Failed to build application state: {e}");
        e
    })?;
    let app = mailtriage_api::app(state);

    tracing::info!(hosted, "mailtriage API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

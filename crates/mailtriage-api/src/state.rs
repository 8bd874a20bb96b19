//! # Application State
//!
//! Shared state handed to every handler. The classifier backend is built
//! on first use and then shared by all requests.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::classifier::ClassifierBackend;
use crate::config::AppConfig;
use crate::replies::ReplyGenerator;
use crate::upstream::{http_client, UpstreamError};

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub replies: ReplyGenerator,
    classifier: Arc<OnceCell<ClassifierBackend>>,
    http: reqwest::Client,
}

impl AppState {
    /// Build state from configuration.
    pub fn new(config: AppConfig) -> Result<Self, UpstreamError> {
        let http = http_client(config.upstream_timeout_secs)?;
        let replies = ReplyGenerator::new(config.openai.as_ref(), http.clone());
        Ok(Self {
            config: Arc::new(config),
            replies,
            classifier: Arc::new(OnceCell::new()),
            http,
        })
    }

    /// The classifier backend, created on first call.
    pub async fn classifier(&self) -> &ClassifierBackend {
        self.classifier
            .get_or_init(|| async {
                let backend =
                    ClassifierBackend::from_config(self.config.zero_shot.as_ref(), self.http.clone());
                tracing::info!(model_loaded = backend.model_loaded(), "classifier ready");
                backend
            })
            .await
    }
}

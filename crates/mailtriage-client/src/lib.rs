//! # mailtriage-client -- Typed Rust client for the classification API
//!
//! Captures user input (email text or a file) and dispatches exactly one
//! HTTP request per call to the classification service:
//!
//! | Operation | Request |
//! |-----------|---------|
//! | [`TriageClient::classify_text`] | `POST /process` with JSON `{"text": ...}` |
//! | [`TriageClient::classify_file`] | `POST /process-file`, multipart part `file` |
//! | [`TriageClient::health`] | `GET /health` |
//!
//! The base URL comes from [`ClientConfig`], which selects between the
//! local and hosted deployments (see [`Environment`]).
//!
//! Requests are never retried and responses are never cached: a failure
//! is reported to the caller as a [`ClientError`] immediately.

pub mod config;
pub mod error;
pub mod types;

pub use config::{ClientConfig, ConfigError, Environment};
pub use error::ClientError;
pub use types::{ClassifyResponse, HealthStatus};

use std::path::Path;
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::types::{ErrorPayload, ProcessTextRequest};

/// Client for the mailtriage classification API.
#[derive(Debug, Clone)]
pub struct TriageClient {
    http: reqwest::Client,
    base_url: Url,
}

impl TriageClient {
    /// Create a client from configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Classify email text.
    ///
    /// Calls `POST {base_url}/process`. Blank text is rejected with
    /// [`ClientError::EmptyInput`] before any request is made.
    pub async fn classify_text(&self, text: &str) -> Result<ClassifyResponse, ClientError> {
        if text.trim().is_empty() {
            return Err(ClientError::EmptyInput);
        }

        let endpoint = "POST /process";
        let url = self.url("process");
        tracing::debug!(%url, chars = text.chars().count(), "dispatching text classification");

        let resp = self
            .http
            .post(&url)
            .json(&ProcessTextRequest { text })
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        decode(endpoint, resp).await
    }

    /// Classify the contents of a file on disk.
    ///
    /// The file is uploaded under its own file name, which the service uses
    /// to choose between plain-text and PDF extraction.
    pub async fn classify_file(&self, path: &Path) -> Result<ClassifyResponse, ClientError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        if file_name.is_empty() {
            return Err(ClientError::EmptyInput);
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| ClientError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.classify_bytes(&file_name, bytes).await
    }

    /// Classify an in-memory file.
    ///
    /// Calls `POST {base_url}/process-file` with a single multipart part
    /// named `file`.
    pub async fn classify_bytes(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ClassifyResponse, ClientError> {
        if file_name.trim().is_empty() {
            return Err(ClientError::EmptyInput);
        }

        let endpoint = "POST /process-file";
        let url = self.url("process-file");
        tracing::debug!(%url, file_name, size = bytes.len(), "dispatching file classification");

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        decode(endpoint, resp).await
    }

    /// Query service health.
    ///
    /// Calls `GET {base_url}/health`.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let endpoint = "GET /health";
        let url = self.url("health");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        decode(endpoint, resp).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }
}

/// Map a response to `T`, turning non-2xx statuses into [`ClientError::Api`]
/// with the service's own error message.
async fn decode<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            endpoint: endpoint.into(),
            status: status.as_u16(),
            message: ErrorPayload::message_from(&body, status),
        });
    }

    resp.json().await.map_err(|e| ClientError::Deserialization {
        endpoint: endpoint.into(),
        source: e,
    })
}

//! # Upstream Model APIs
//!
//! Shared plumbing for the two optional remote models (OpenAI chat
//! completions for replies, Hugging Face zero-shot inference for
//! classification). Each call is made once; callers fall back to the
//! local implementation on any [`UpstreamError`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from calls to a remote model API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// Transport failure (connect, timeout, TLS).
    #[error("HTTP request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("failed to decode response from {endpoint}: {reason}")]
    Deserialization { endpoint: String, reason: String },
}

/// Build the HTTP client shared by all upstream calls.
pub fn http_client(timeout_secs: u64) -> Result<reqwest::Client, UpstreamError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| UpstreamError::Http {
            endpoint: "client_init".into(),
            source: e,
        })
}

/// Send a prepared request and decode a JSON response into `T`.
pub(crate) async fn send_json<T: DeserializeOwned>(
    endpoint: &str,
    request: reqwest::RequestBuilder,
) -> Result<T, UpstreamError> {
    let resp = request.send().await.map_err(|e| UpstreamError::Http {
        endpoint: endpoint.into(),
        source: e,
    })?;

    let status = resp.status();
    let body = resp.text().await.map_err(|e| UpstreamError::Http {
        endpoint: endpoint.into(),
        source: e,
    })?;

    if !status.is_success() {
        return Err(UpstreamError::Api {
            endpoint: endpoint.into(),
            status: status.as_u16(),
            body: truncate(&body, 256),
        });
    }

    serde_json::from_str(&body).map_err(|e| UpstreamError::Deserialization {
        endpoint: endpoint.into(),
        reason: e.to_string(),
    })
}

fn truncate(body: &str, max_chars: usize) -> String {
    let mut out: String = body.chars().take(max_chars).collect();
    if body.chars().count() > max_chars {
        out.push('…');
    }
    out
}

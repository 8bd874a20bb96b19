//! Request and response payloads of the classification API.

use mailtriage_core::{Category, Scores};
use serde::{Deserialize, Serialize};

/// Body of `POST /process`.
#[derive(Debug, Serialize)]
pub struct ProcessTextRequest<'a> {
    pub text: &'a str,
}

/// Successful response of `POST /process` and `POST /process-file`.
///
/// `scores` and `preprocessed` default when absent so that older
/// deployments that only return the category and reply still decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifyResponse {
    pub category: Category,
    #[serde(default = "empty_scores")]
    pub scores: Scores,
    pub suggested_response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preprocessed: Option<String>,
}

fn empty_scores() -> Scores {
    Scores::new(0.0, 0.0)
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// Error bodies the service may return. The structured form is current;
/// the flat `{"error": "..."}` form is what earlier deployments sent.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorPayload {
    Structured { error: ErrorDetail },
    Flat { error: String },
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    pub message: String,
}

impl ErrorPayload {
    /// Human-readable message from a raw error body, falling back to the
    /// body itself (or the status reason) when it is not a known shape.
    pub(crate) fn message_from(body: &str, status: reqwest::StatusCode) -> String {
        match serde_json::from_str::<ErrorPayload>(body) {
            Ok(Self::Structured { error }) => error.message,
            Ok(Self::Flat { error }) => error,
            Err(_) if !body.trim().is_empty() => body.trim().to_string(),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        }
    }
}

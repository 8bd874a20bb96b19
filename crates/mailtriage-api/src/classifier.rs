//! # Classifier Backends
//!
//! The service classifies with a Hugging Face zero-shot model when
//! `HF_API_TOKEN` is configured and with the keyword classifier otherwise.
//! A remote failure never fails the request: the keyword classifier
//! answers instead and the failure is logged.

use mailtriage_core::{Category, Classification, KeywordClassifier, Scores};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::config::ZeroShotConfig;
use crate::upstream::{send_json, UpstreamError};

/// Classifier selected at startup.
#[derive(Debug, Clone)]
pub enum ClassifierBackend {
    /// Local keyword counting.
    Keyword(KeywordClassifier),
    /// Remote zero-shot model with a keyword fallback.
    ZeroShot {
        model: ZeroShotClassifier,
        fallback: KeywordClassifier,
    },
}

impl ClassifierBackend {
    /// Pick the backend for the given configuration.
    pub fn from_config(config: Option<&ZeroShotConfig>, http: reqwest::Client) -> Self {
        match config {
            Some(cfg) => Self::ZeroShot {
                model: ZeroShotClassifier::new(cfg, http),
                fallback: KeywordClassifier::new(),
            },
            None => Self::Keyword(KeywordClassifier::new()),
        }
    }

    /// Whether a remote model backs classification.
    pub fn model_loaded(&self) -> bool {
        matches!(self, Self::ZeroShot { .. })
    }

    /// Classify `text`. Blank text never reaches the remote model.
    pub async fn classify(&self, text: &str) -> Classification {
        match self {
            Self::Keyword(keywords) => keywords.classify(text),
            Self::ZeroShot { fallback, .. } if text.trim().is_empty() => fallback.classify(text),
            Self::ZeroShot { model, fallback } => match model.classify(text).await {
                Ok(classification) => classification,
                Err(e) => {
                    tracing::warn!(error = %e, "zero-shot classification failed, using keywords");
                    fallback.classify(text)
                }
            },
        }
    }
}

/// Client for Hugging Face zero-shot classification inference.
#[derive(Clone)]
pub struct ZeroShotClassifier {
    http: reqwest::Client,
    url: String,
    endpoint: String,
    token: Zeroizing<String>,
}

impl std::fmt::Debug for ZeroShotClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroShotClassifier")
            .field("url", &self.url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters,
}

#[derive(Serialize)]
struct ZeroShotParameters {
    candidate_labels: Vec<&'static str>,
}

/// Response shapes served by the inference API: the classic
/// `{labels, scores}` object (alone or wrapped in an array) and the
/// `[{label, score}]` list of the newer router.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotPayload {
    Single(LabelsAndScores),
    Batch(Vec<LabelsAndScores>),
    Pairs(Vec<LabelScore>),
}

#[derive(Debug, Deserialize)]
struct LabelsAndScores {
    labels: Vec<String>,
    scores: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

impl ZeroShotPayload {
    /// Labels paired with scores, best first.
    fn ranked(self) -> Vec<(String, f64)> {
        let mut pairs: Vec<(String, f64)> = match self {
            Self::Single(out) => out.labels.into_iter().zip(out.scores).collect(),
            Self::Batch(outs) => outs
                .into_iter()
                .next()
                .map(|out| out.labels.into_iter().zip(out.scores).collect())
                .unwrap_or_default(),
            Self::Pairs(pairs) => pairs.into_iter().map(|p| (p.label, p.score)).collect(),
        };
        pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
        pairs
    }

    /// `None` when labels were returned but none is a known category.
    fn into_classification(self) -> Option<Classification> {
        let ranked = self.ranked();
        let answered = !ranked.is_empty();
        let known: Vec<(Category, f64)> = ranked
            .into_iter()
            .filter_map(|(label, score)| label.parse::<Category>().ok().map(|c| (c, score)))
            .collect();

        let category = match known.first() {
            Some((category, _)) => *category,
            None if answered => return None,
            // An empty answer counts as productive.
            None => Category::Productive,
        };

        Some(Classification {
            category,
            scores: Scores::from_pairs(known),
        })
    }
}

impl ZeroShotClassifier {
    /// Create a classifier for the configured model.
    pub fn new(config: &ZeroShotConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            url: format!(
                "{}/models/{}",
                config.base_url.as_str().trim_end_matches('/'),
                config.model
            ),
            endpoint: format!("POST /models/{}", config.model),
            token: config.api_token.clone(),
        }
    }

    /// Ask the model to choose between the category labels.
    pub async fn classify(&self, text: &str) -> Result<Classification, UpstreamError> {
        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: Category::all().iter().map(|c| c.as_str()).collect(),
            },
        };

        let endpoint = self.endpoint.as_str();
        let payload: ZeroShotPayload = send_json(
            endpoint,
            self.http
                .post(&self.url)
                .bearer_auth(self.token.as_str())
                .json(&request),
        )
        .await?;

        let classification =
            payload
                .into_classification()
                .ok_or_else(|| UpstreamError::Deserialization {
                    endpoint: endpoint.into(),
                    reason: "no candidate label in response".into(),
                })?;
        tracing::debug!(category = %classification.category, "zero-shot classification");
        Ok(classification)
    }
}

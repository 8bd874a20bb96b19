//! # Suggested Replies
//!
//! Replies come from OpenAI chat completions when `OPENAI_API_KEY` is set.
//! Without a key, or when the call fails or returns nothing, a canned reply
//! for the category is used.

use mailtriage_core::{canned_reply, Category};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::config::OpenAiConfig;
use crate::upstream::{send_json, UpstreamError};

const SYSTEM_PROMPT: &str = "Você é um assistente que responde emails de forma clara e cordial.";
const TEMPERATURE: f32 = 0.5;
const MAX_TOKENS: u32 = 200;

/// Produces the suggested reply for a classified email.
#[derive(Debug, Clone, Default)]
pub struct ReplyGenerator {
    chat: Option<ChatClient>,
}

impl ReplyGenerator {
    /// Build a generator; canned replies only when `config` is `None`.
    pub fn new(config: Option<&OpenAiConfig>, http: reqwest::Client) -> Self {
        Self {
            chat: config.map(|cfg| ChatClient::new(cfg, http)),
        }
    }

    /// Whether replies are generated by a language model.
    pub fn uses_model(&self) -> bool {
        self.chat.is_some()
    }

    /// Suggested reply for `text`, classified as `category`.
    pub async fn generate(&self, category: Category, text: &str) -> String {
        if let Some(chat) = self.chat.as_ref().filter(|_| !text.trim().is_empty()) {
            match chat.complete(text).await {
                Ok(reply) => return reply,
                Err(e) => tracing::warn!(error = %e, "reply generation failed, using canned reply"),
            }
        }
        canned_reply(category, &mut rand::thread_rng()).to_string()
    }
}

/// Minimal OpenAI chat-completions client.
#[derive(Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    url: String,
    api_key: Zeroizing<String>,
    model: String,
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("url", &self.url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatClient {
    /// Create a client for the configured model.
    pub fn new(config: &OpenAiConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            url: format!(
                "{}/chat/completions",
                config.base_url.as_str().trim_end_matches('/')
            ),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    /// Ask the model for a reply to the email `text`.
    pub async fn complete(&self, text: &str) -> Result<String, UpstreamError> {
        let endpoint = "POST /chat/completions";
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response: ChatResponse = send_json(
            endpoint,
            self.http
                .post(&self.url)
                .bearer_auth(self.api_key.as_str())
                .json(&request),
        )
        .await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| UpstreamError::Deserialization {
                endpoint: endpoint.into(),
                reason: "completion has no content".into(),
            })
    }
}

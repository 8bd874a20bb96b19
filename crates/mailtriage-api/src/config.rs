//! # Service Configuration
//!
//! Every setting is read from environment variables (a `.env` file is
//! honoured by the binary). Parsing goes through a lookup closure so tests
//! never touch the process environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `PORT` | unset: bind `127.0.0.1:5000`; set: bind `0.0.0.0:$PORT` (hosted) |
//! | `FRONTEND_DIR` | `frontend` |
//! | `FRONTEND_ORIGINS` | local dev servers + hosted front end |
//! | `MAX_CONTENT_LENGTH_MB` | `5` |
//! | `UPSTREAM_TIMEOUT_SECS` | `30` |
//! | `OPENAI_API_KEY` / `OPENAI_MODEL` / `OPENAI_BASE_URL` | unset / `gpt-3.5-turbo` / `https://api.openai.com/v1` |
//! | `HF_API_TOKEN` / `HF_MODEL` / `HF_BASE_URL` | unset / `facebook/bart-large-mnli` / `https://api-inference.huggingface.co` |

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use url::Url;
use zeroize::Zeroizing;

/// Origins allowed by CORS when `FRONTEND_ORIGINS` is not set.
pub const DEFAULT_FRONTEND_ORIGINS: &[&str] = &[
    "http://127.0.0.1:5000",
    "http://localhost:5000",
    "http://127.0.0.1:3000",
    "http://localhost:3000",
    "http://127.0.0.1:5173",
    "http://localhost:5173",
    "http://127.0.0.1:5500",
    "http://localhost:5500",
    "https://email-classificacao.onrender.com",
];

const LOCAL_PORT: u16 = 5000;
const DEFAULT_MAX_CONTENT_LENGTH_MB: usize = 5;
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to bind. Loopback locally, unspecified when hosted.
    pub host: IpAddr,
    pub port: u16,
    /// Directory holding the static front end served under `/app`.
    pub frontend_dir: PathBuf,
    /// Origins allowed to call the API from a browser.
    pub frontend_origins: Vec<String>,
    /// Maximum accepted request body, in bytes.
    pub max_body_bytes: usize,
    /// Timeout applied to calls to OpenAI and Hugging Face.
    pub upstream_timeout_secs: u64,
    /// Reply generation through OpenAI; canned replies when `None`.
    pub openai: Option<OpenAiConfig>,
    /// Zero-shot classification through Hugging Face; keywords when `None`.
    pub zero_shot: Option<ZeroShotConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: LOCAL_PORT,
            frontend_dir: PathBuf::from("frontend"),
            frontend_origins: DEFAULT_FRONTEND_ORIGINS
                .iter()
                .map(|o| o.to_string())
                .collect(),
            max_body_bytes: DEFAULT_MAX_CONTENT_LENGTH_MB * 1024 * 1024,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            openai: None,
            zero_shot: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let (host, port) = match non_empty(&lookup, "PORT") {
            Some(raw) => (
                IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                parse_number("PORT", &raw)?,
            ),
            None => (defaults.host, defaults.port),
        };

        let frontend_origins = match non_empty(&lookup, "FRONTEND_ORIGINS") {
            Some(raw) => raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.frontend_origins,
        };

        let max_body_bytes = match non_empty(&lookup, "MAX_CONTENT_LENGTH_MB") {
            Some(raw) => parse_number::<usize>("MAX_CONTENT_LENGTH_MB", &raw)?
                .checked_mul(1024 * 1024)
                .ok_or_else(|| ConfigError::InvalidNumber("MAX_CONTENT_LENGTH_MB".into(), raw))?,
            None => defaults.max_body_bytes,
        };

        let upstream_timeout_secs = match non_empty(&lookup, "UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => parse_number("UPSTREAM_TIMEOUT_SECS", &raw)?,
            None => defaults.upstream_timeout_secs,
        };

        Ok(Self {
            host,
            port,
            frontend_dir: non_empty(&lookup, "FRONTEND_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.frontend_dir),
            frontend_origins,
            max_body_bytes,
            upstream_timeout_secs,
            openai: OpenAiConfig::from_lookup(&lookup)?,
            zero_shot: ZeroShotConfig::from_lookup(&lookup)?,
        })
    }

    /// Socket address to bind.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the service binds all interfaces, as on a hosting platform.
    pub fn is_hosted(&self) -> bool {
        self.host.is_unspecified()
    }
}

/// OpenAI chat-completions settings.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: Zeroizing<String>,
    pub model: String,
    /// API root, e.g. `https://api.openai.com/v1`.
    pub base_url: Url,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenAiConfig {
    /// `None` when `OPENAI_API_KEY` is unset or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = non_empty(&lookup, "OPENAI_API_KEY") else {
            return Ok(None);
        };
        Ok(Some(Self {
            api_key: Zeroizing::new(api_key),
            model: non_empty(&lookup, "OPENAI_MODEL").unwrap_or_else(|| "gpt-3.5-turbo".into()),
            base_url: lookup_url(&lookup, "OPENAI_BASE_URL", "https://api.openai.com/v1")?,
        }))
    }
}

/// Hugging Face zero-shot inference settings.
#[derive(Clone)]
pub struct ZeroShotConfig {
    pub api_token: Zeroizing<String>,
    /// Model id, e.g. `facebook/bart-large-mnli`.
    pub model: String,
    pub base_url: Url,
}

impl std::fmt::Debug for ZeroShotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZeroShotConfig")
            .field("api_token", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ZeroShotConfig {
    /// `None` when `HF_API_TOKEN` is unset or blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<Self>, ConfigError> {
        let Some(api_token) = non_empty(&lookup, "HF_API_TOKEN") else {
            return Ok(None);
        };
        Ok(Some(Self {
            api_token: Zeroizing::new(api_token),
            model: non_empty(&lookup, "HF_MODEL")
                .unwrap_or_else(|| "facebook/bart-large-mnli".into()),
            base_url: lookup_url(&lookup, "HF_BASE_URL", "https://api-inference.huggingface.co")?,
        }))
    }
}

fn non_empty(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn lookup_url(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<Url, ConfigError> {
    let raw = non_empty(lookup, key).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(key.to_string(), e.to_string()))
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.parse()
        .map_err(|_| ConfigError::InvalidNumber(key.to_string(), raw.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid number for {0}: \"{1}\"")]
    InvalidNumber(String, String),
}

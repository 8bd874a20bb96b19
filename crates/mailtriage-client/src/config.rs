//! Client configuration and backend environment selection.

use url::Url;

/// Base URL of a service running on the developer's machine.
pub const LOCAL_BASE_URL: &str = "http://127.0.0.1:5000";

/// Base URL of the hosted deployment.
pub const HOSTED_BASE_URL: &str = "https://email-classificacao.onrender.com";

/// Where the classification service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// A service started locally with `mailtriage-api`.
    Local,
    /// The hosted deployment.
    Hosted,
}

impl Environment {
    /// Pick the environment from the host a front end is served from.
    ///
    /// Loopback names and an empty host (a page opened from disk) map to
    /// [`Environment::Local`]; every other host is [`Environment::Hosted`].
    pub fn for_host(host: &str) -> Self {
        match host.trim().trim_start_matches('[').trim_end_matches(']') {
            "" | "localhost" | "127.0.0.1" | "::1" | "0.0.0.0" => Self::Local,
            _ => Self::Hosted,
        }
    }

    /// Default base URL for this environment.
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Local => LOCAL_BASE_URL,
            Self::Hosted => HOSTED_BASE_URL,
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "dev" | "development" => Ok(Self::Local),
            "hosted" | "prod" | "production" | "render" => Ok(Self::Hosted),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Configuration for [`crate::TriageClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the classification service.
    pub base_url: Url,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Configuration for one of the known environments.
    pub fn for_environment(env: Environment) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_url("environment", env.base_url())?,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `MAILTRIAGE_API_URL`: explicit base URL; wins over `MAILTRIAGE_ENV`
    /// - `MAILTRIAGE_ENV`: `local` or `hosted` (default: `local`)
    /// - `MAILTRIAGE_TIMEOUT_SECS` (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = match lookup("MAILTRIAGE_API_URL").filter(|v| !v.trim().is_empty()) {
            Some(raw) => parse_url("MAILTRIAGE_API_URL", raw.trim())?,
            None => {
                let env = match lookup("MAILTRIAGE_ENV").filter(|v| !v.trim().is_empty()) {
                    Some(raw) => raw.parse()?,
                    None => Environment::Local,
                };
                parse_url("MAILTRIAGE_ENV", env.base_url())?
            }
        };

        Ok(Self {
            base_url,
            timeout_secs: Self::timeout_from_lookup(lookup),
        })
    }

    /// `MAILTRIAGE_TIMEOUT_SECS`, or the default when unset or unparsable.
    pub fn timeout_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> u64 {
        lookup("MAILTRIAGE_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}

const DEFAULT_TIMEOUT_SECS: u64 = 60;

fn parse_url(source: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(source.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("unknown environment \"{0}\" (expected local or hosted)")]
    UnknownEnvironment(String),
}

//! # mailtriage-cli: Command-Line Front End
//!
//! Collects email text or a file from the command line, sends it to the
//! classification service through [`mailtriage_client::TriageClient`] and
//! prints the result.
//!
//! ## Subcommands
//!
//! - `classify`: classify `--text` or `--file` and print category,
//!   suggested response and preprocessed text
//! - `health`: print the service status
//!
//! ## Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | the request failed (transport, service error, bad response) |
//! | 2 | nothing to send |

pub mod classify;
pub mod health;

use anyhow::Context;
use clap::Args;
use mailtriage_client::{ClientConfig, ConfigError, Environment, TriageClient};
use url::Url;

/// Options selecting the service to talk to.
///
/// Precedence: `--url`, then `--env`, then `MAILTRIAGE_API_URL` /
/// `MAILTRIAGE_ENV`, then the local service.
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Service environment: local or hosted.
    #[arg(long)]
    pub env: Option<Environment>,

    /// Explicit service base URL.
    #[arg(long)]
    pub url: Option<Url>,
}

impl ConnectionArgs {
    /// Resolve the client configuration through `lookup`.
    ///
    /// The service variables are read only when neither flag is given, so
    /// a bad `MAILTRIAGE_ENV` cannot fail a command that names its target.
    pub fn config(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ClientConfig, ConfigError> {
        let base_url = match (&self.url, self.env) {
            (Some(url), _) => url.clone(),
            (None, Some(env)) => ClientConfig::for_environment(env)?.base_url,
            (None, None) => return ClientConfig::from_lookup(lookup),
        };
        Ok(ClientConfig {
            base_url,
            timeout_secs: ClientConfig::timeout_from_lookup(lookup),
        })
    }

    /// Build a client from the process environment and the flags.
    pub fn client(&self) -> anyhow::Result<TriageClient> {
        let config = self
            .config(|key| std::env::var(key).ok())
            .context("invalid service configuration")?;
        tracing::debug!(base_url = %config.base_url, "resolved service URL");
        TriageClient::new(config).context("failed to create HTTP client")
    }
}

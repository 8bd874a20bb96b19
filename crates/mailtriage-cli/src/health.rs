//! # Health Subcommand
//!
//! Queries `GET /health` and prints whether the service is up and whether
//! a remote model backs classification.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use mailtriage_client::HealthStatus;

use crate::ConnectionArgs;

/// Arguments for the `mailtriage health` subcommand.
#[derive(Args, Debug, Default)]
pub struct HealthArgs {
    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// Execute the health subcommand.
///
/// Returns exit code: 0 when the service reports `ok`, 1 otherwise.
pub async fn run_health(args: &HealthArgs) -> Result<u8> {
    let client = args.connection.client()?;
    let mut out = io::stdout();

    match client.health().await {
        Ok(health) => {
            render(client.base_url().as_str(), &health, &mut out)?;
            Ok(if health.status == "ok" { 0 } else { 1 })
        }
        Err(e) => {
            tracing::error!(error = %e, base_url = %client.base_url(), "health check failed");
            eprintln!("error: {e}");
            Ok(1)
        }
    }
}

fn render(base_url: &str, health: &HealthStatus, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Service: {base_url}")?;
    writeln!(out, "Status: {}", health.status)?;
    writeln!(
        out,
        "Model loaded: {}",
        if health.model_loaded { "yes" } else { "no" }
    )
}

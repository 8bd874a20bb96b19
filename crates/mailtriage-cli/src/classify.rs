//! # Classify Subcommand
//!
//! Sends email text or a file to the service and renders the response.
//!
//! A file wins over text when both are given. With neither (or only
//! blank text) nothing is sent: the user is told to enter text or choose
//! a file and the command exits with code 2.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use mailtriage_client::{ClassifyResponse, ClientError};

use crate::ConnectionArgs;

/// Arguments for the `mailtriage classify` subcommand.
#[derive(Args, Debug, Default)]
pub struct ClassifyArgs {
    /// Email text to classify.
    #[arg(long, short)]
    pub text: Option<String>,

    /// A .txt or .pdf file to classify. Takes precedence over --text.
    #[arg(long, short, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Print the service response as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

/// What gets sent.
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Text(&'a str),
    File(&'a Path),
}

impl<'a> Input<'a> {
    /// Pick the input from the arguments; `None` when there is nothing to send.
    pub fn from_args(args: &'a ClassifyArgs) -> Option<Self> {
        if let Some(path) = &args.file {
            return Some(Self::File(path));
        }
        args.text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .map(Self::Text)
    }

    /// `"text"` or `"file"`, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::File(_) => "file",
        }
    }

    /// Characters of text, or bytes of the file path. Never the content.
    pub fn size(&self) -> usize {
        match self {
            Self::Text(text) => text.chars().count(),
            Self::File(path) => path.as_os_str().len(),
        }
    }
}

/// Execute the classify subcommand against stdout and stderr.
///
/// Returns exit code: 0 on success, 1 on request failure, 2 on empty input.
pub async fn run_classify(args: &ClassifyArgs) -> Result<u8> {
    classify(args, &mut io::stdout(), &mut io::stderr()).await
}

/// Execute the classify subcommand, writing results to `out` and alerts to `err`.
pub async fn classify(
    args: &ClassifyArgs,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<u8> {
    let Some(input) = Input::from_args(args) else {
        writeln!(err, "error: {}", ClientError::EmptyInput)?;
        return Ok(2);
    };

    let client = args.connection.client()?;
    tracing::info!(
        base_url = %client.base_url(),
        kind = input.kind(),
        size = input.size(),
        "sending email for classification"
    );

    let result = match input {
        Input::Text(text) => client.classify_text(text).await,
        Input::File(path) => client.classify_file(path).await,
    };

    match result {
        Ok(response) => {
            if args.json {
                serde_json::to_writer_pretty(&mut *out, &response)?;
                writeln!(out)?;
            } else {
                render(&response, out)?;
            }
            Ok(0)
        }
        Err(ClientError::EmptyInput) => {
            writeln!(err, "error: {}", ClientError::EmptyInput)?;
            Ok(2)
        }
        Err(e) => {
            tracing::error!(error = %e, base_url = %client.base_url(), "classification failed");
            writeln!(err, "error: {e}")?;
            Ok(1)
        }
    }
}

/// Write the response fields, one labelled line each. The preprocessed
/// line is omitted when the service returned none.
pub fn render(response: &ClassifyResponse, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Category: {}", response.category)?;
    writeln!(out, "Suggested response: {}", response.suggested_response)?;
    if let Some(preprocessed) = response.preprocessed.as_deref().filter(|p| !p.is_empty()) {
        writeln!(out, "Preprocessed: {preprocessed}")?;
    }
    Ok(())
}

//! # Error Types
//!
//! Structured errors for the fallible core operations, built with
//! `thiserror`. Classification and preprocessing are total functions and
//! have no error type.

use thiserror::Error;

/// Errors while turning an uploaded file into plain text.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The file extension is neither `.txt` nor `.pdf`.
    #[error("unsupported file format for \"{0}\"; use .txt or .pdf")]
    UnsupportedFormat(String),

    /// The PDF could not be parsed.
    #[error("could not read PDF \"{file_name}\": {reason}")]
    Pdf {
        /// Name of the uploaded file.
        file_name: String,
        /// Parser diagnostic.
        reason: String,
    },
}

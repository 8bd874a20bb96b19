//! # Document Text Extraction
//!
//! Turns an uploaded file into plain text. The format is chosen from the
//! file name's extension, case-insensitively:
//!
//! | Extension | Handling |
//! |-----------|----------|
//! | `.txt`    | UTF-8 decode; invalid byte sequences are dropped |
//! | `.pdf`    | text of every page, concatenated in page order |
//!
//! Anything else is rejected with [`ExtractError::UnsupportedFormat`].

use crate::error::ExtractError;

/// Extract plain text from an uploaded file.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String, ExtractError> {
    let lowered = file_name.to_lowercase();

    if lowered.ends_with(".txt") {
        Ok(decode_lossy(bytes))
    } else if lowered.ends_with(".pdf") {
        tracing::debug!(file_name, size = bytes.len(), "extracting PDF text");
        // The parser panics on some malformed documents.
        let reason = match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(bytes)) {
            Ok(Ok(text)) => return Ok(text),
            Ok(Err(e)) => e.to_string(),
            Err(_) => "malformed PDF structure".to_string(),
        };
        Err(ExtractError::Pdf {
            file_name: file_name.to_string(),
            reason,
        })
    } else {
        Err(ExtractError::UnsupportedFormat(file_name.to_string()))
    }
}

/// Decode UTF-8, silently dropping invalid sequences instead of
/// substituting U+FFFD.
fn decode_lossy(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => String::from_utf8_lossy(bytes)
            .chars()
            .filter(|c| *c != char::REPLACEMENT_CHARACTER)
            .collect(),
    }
}

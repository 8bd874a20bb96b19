//! # Custom Extractors & Validation
//!
//! Provides the [`Validate`] trait for request DTOs and helpers to parse
//! and validate JSON bodies in handlers.
//!
//! Bodies are taken as raw bytes and parsed as JSON whatever their
//! `Content-Type`, so simple clients that post text with a missing or
//! generic content type are still served.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Trait for request types that can validate their rules beyond what
/// serde deserialization checks.
pub trait Validate {
    /// Validate the request. Returns an error message on failure.
    fn validate(&self) -> Result<(), String>;
}

/// Parse a JSON body, mapping read and parse errors to [`AppError`].
///
/// ```ignore
/// async fn handler(body: Result<Bytes, BytesRejection>) -> Result<..., AppError> {
///     let req: T = extract_json(body)?;
/// }
/// ```
pub fn extract_json<T: DeserializeOwned>(
    result: Result<Bytes, BytesRejection>,
) -> Result<T, AppError> {
    let bytes = result?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {e}")))
}

/// Parse a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: DeserializeOwned + Validate>(
    result: Result<Bytes, BytesRejection>,
) -> Result<T, AppError> {
    let value: T = extract_json(result)?;
    value.validate().map_err(AppError::BadRequest)?;
    Ok(value)
}

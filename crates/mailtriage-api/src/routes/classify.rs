//! # Classification Endpoints
//!
//! Both endpoints run the same pipeline on the email text:
//!
//! ```text
//! text ─┬─ preprocess ──────────────────────────► preprocessed
//!       └─ classifier ─► category, scores ─► replies ─► suggested_response
//! ```
//!
//! The classifier and the reply generator see the original text; the
//! preprocessed form is returned for display only.

use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use mailtriage_core::{extract_text, preprocess, Category, Classification, Scores};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

/// Multipart part carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Body of `POST /process`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProcessTextRequest {
    /// Email text. Surrounding whitespace is ignored.
    #[serde(default)]
    pub text: Option<String>,
}

impl ProcessTextRequest {
    fn trimmed(&self) -> &str {
        self.text.as_deref().unwrap_or_default().trim()
    }
}

impl Validate for ProcessTextRequest {
    fn validate(&self) -> Result<(), String> {
        if self.trimmed().is_empty() {
            return Err("field 'text' is empty or missing".into());
        }
        Ok(())
    }
}

/// Multipart form of `POST /process-file`.
#[derive(ToSchema)]
pub struct FileUpload {
    /// A `.txt` or `.pdf` file.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Classification result.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProcessResponse {
    #[schema(value_type = String, example = "Produtivo")]
    pub category: Category,
    /// Score per category, keyed by category name.
    #[schema(value_type = Object)]
    pub scores: Scores,
    pub suggested_response: String,
    /// Lowercased, stopword-free, stemmed form of the input.
    pub preprocessed: String,
}

/// Build the classification router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/process", post(process_text))
        .route("/process-file", post(process_file))
}

/// POST /process: Classify email text.
#[utoipa::path(
    post,
    path = "/process",
    request_body = ProcessTextRequest,
    responses(
        (status = 200, description = "Email classified", body = ProcessResponse),
        (status = 400, description = "Missing or blank text, or malformed JSON", body = crate::error::ErrorBody),
        (status = 413, description = "Body above the size limit", body = crate::error::ErrorBody),
    ),
    tag = "classification"
)]
async fn process_text(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ProcessResponse>, AppError> {
    let req: ProcessTextRequest = extract_validated_json(body)?;
    Ok(Json(classify(&state, req.trimmed()).await))
}

/// POST /process-file: Classify the text of an uploaded `.txt` or `.pdf` file.
#[utoipa::path(
    post,
    path = "/process-file",
    request_body(content = FileUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Email classified", body = ProcessResponse),
        (status = 400, description = "No file, empty file name, or no text in the file", body = crate::error::ErrorBody),
        (status = 413, description = "Upload above the size limit", body = crate::error::ErrorBody),
        (status = 500, description = "Text could not be extracted", body = crate::error::ErrorBody),
    ),
    tag = "classification"
)]
async fn process_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ProcessResponse>, AppError> {
    let mut multipart = multipart?;
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("send a file in the '{FILE_FIELD}' field")))?;

    if upload.file_name.trim().is_empty() {
        return Err(AppError::BadRequest("empty file name".into()));
    }

    tracing::debug!(file_name = %upload.file_name, size = upload.bytes.len(), "extracting text");
    let Upload { file_name, bytes } = upload;
    let text = tokio::task::spawn_blocking(move || extract_text(&file_name, &bytes))
        .await
        .map_err(|e| AppError::Internal(format!("extraction task failed: {e}")))??;

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest(
            "could not extract any text from the file".into(),
        ));
    }

    Ok(Json(classify(&state, text).await))
}

struct Upload {
    file_name: String,
    bytes: Bytes,
}

/// First part named [`FILE_FIELD`], if any. Other parts are skipped.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        return Ok(Some(Upload { file_name, bytes }));
    }
    Ok(None)
}

async fn classify(state: &AppState, text: &str) -> ProcessResponse {
    let preprocessed = preprocess(text);
    let Classification { category, scores } = state.classifier().await.classify(text).await;
    let suggested_response = state.replies.generate(category, text).await;

    tracing::info!(
        %category,
        productive = scores.get(Category::Productive),
        unproductive = scores.get(Category::Unproductive),
        "email classified"
    );

    ProcessResponse {
        category,
        scores,
        suggested_response,
        preprocessed,
    }
}

use std::any::Any;

use axum::{
    body::to_bytes,
    extract::{multipart::MultipartError, Request},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::document::{DocumentError, SUPPORTED_EXTENSIONS};
use crate::extraction::structured::ExtractionError;

pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "File is too large. Please upload a smaller file.";
pub const UNSUPPORTED_MEDIA_MESSAGE: &str =
    "Unsupported media type. Send multipart/form-data for uploads or application/json for data.";
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal server error occurred";

/// Longest plain-text error body that is carried over into the JSON envelope.
const MAX_REWRITTEN_BODY_BYTES: usize = 16 * 1024;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Gemini API key is not configured")]
    AiUnavailable,

    #[error("A resume file is required in the 'image' or 'file' field")]
    MissingFile { received_fields: Vec<String> },

    #[error("No file was selected")]
    NoFileSelected,

    #[error("The uploaded file is empty")]
    EmptyUpload,

    #[error(
        "Unsupported file type '{extension}'. Supported types: {}",
        SUPPORTED_EXTENSIONS.join(", ")
    )]
    UnsupportedFileType { extension: String },

    #[error("Could not process the file: {0}")]
    Document(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{}", multipart_message(.0))]
    Multipart(#[from] MultipartError),

    #[error("The AI model returned an empty response")]
    AiEmptyResponse,

    #[error("Could not extract information from the resume. Please upload a clearer image.")]
    ExtractionFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

fn multipart_message(e: &MultipartError) -> String {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PAYLOAD_TOO_LARGE_MESSAGE.to_string()
    } else {
        e.body_text()
    }
}

impl From<DocumentError> for AppError {
    fn from(e: DocumentError) -> Self {
        match e {
            DocumentError::UnsupportedExtension { extension } => {
                AppError::UnsupportedFileType { extension }
            }
            DocumentError::Task(_) | DocumentError::Encode(_) => {
                AppError::Internal(anyhow::Error::new(e))
            }
            other => AppError::Document(other.to_string()),
        }
    }
}

impl From<ExtractionError> for AppError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::EmptyResponse => AppError::AiEmptyResponse,
            other => AppError::ExtractionFailed(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingFile { .. }
            | AppError::NoFileSelected
            | AppError::EmptyUpload
            | AppError::UnsupportedFileType { .. }
            | AppError::Document(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Multipart(e) => e.status(),
            AppError::AiUnavailable => {
                tracing::error!("Extraction requested without a Gemini API key");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::AiEmptyResponse => {
                tracing::error!("Gemini returned no text for the extraction prompt");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::ExtractionFailed(detail) => {
                tracing::error!("Extraction failed: {detail}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            AppError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
            other => other.to_string(),
        };

        let body = match self {
            AppError::MissingFile { received_fields } => Json(json!({
                "error": message,
                "received_fields": received_fields
            })),
            _ => Json(json!({ "error": message })),
        };

        (status, body).into_response()
    }
}

/// Middleware: rewrites any non-JSON 4xx/5xx response (framework rejections,
/// unknown routes, body-limit hits) into the `{"error": ...}` envelope.
pub async fn json_error_responses(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) || is_json(&response) {
        return response;
    }

    let message = match status {
        StatusCode::PAYLOAD_TOO_LARGE => PAYLOAD_TOO_LARGE_MESSAGE.to_string(),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => UNSUPPORTED_MEDIA_MESSAGE.to_string(),
        s if s.is_server_error() => INTERNAL_ERROR_MESSAGE.to_string(),
        s => {
            let body = to_bytes(response.into_body(), MAX_REWRITTEN_BODY_BYTES)
                .await
                .unwrap_or_default();
            let text = String::from_utf8_lossy(&body).trim().to_string();
            if text.is_empty() {
                s.canonical_reason().unwrap_or("Request failed").to_string()
            } else {
                text
            }
        }
    };

    (status, Json(json!({ "error": message }))).into_response()
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// `CatchPanicLayer` handler: a panicking handler yields a JSON 500.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    tracing::error!("Request handler panicked: {detail}");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}

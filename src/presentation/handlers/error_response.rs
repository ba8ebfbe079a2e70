use axum::Json;
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{RepositoryError, StagingStoreError, TranscriptionError};
use crate::domain::ValidationError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            error: error.into(),
            details,
        }
    }
}

pub fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    (status, Json(ErrorResponse::new(error, details))).into_response()
}

pub fn transcription_status(e: &TranscriptionError) -> (StatusCode, &'static str) {
    match e {
        TranscriptionError::Validation(ValidationError::UnsupportedFormat(_)) => {
            (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Invalid audio file")
        }
        TranscriptionError::Validation(ValidationError::FileTooLarge { .. }) => {
            (StatusCode::PAYLOAD_TOO_LARGE, "Audio file too large")
        }
        TranscriptionError::Validation(ValidationError::EmptyFile) => {
            (StatusCode::BAD_REQUEST, "Invalid audio file")
        }
        TranscriptionError::MissingCredential(_) | TranscriptionError::InvalidCredential(_) => {
            (StatusCode::UNAUTHORIZED, "Authentication failed")
        }
        TranscriptionError::RateLimited { .. } => {
            (StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded")
        }
        TranscriptionError::PayloadTooLarge(_) => {
            (StatusCode::PAYLOAD_TOO_LARGE, "Audio file too large")
        }
        TranscriptionError::Provider { .. }
        | TranscriptionError::Transport { .. }
        | TranscriptionError::InvalidResponse { .. } => {
            (StatusCode::BAD_GATEWAY, "Failed to transcribe audio")
        }
        TranscriptionError::NoTextReturned(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "No transcription returned")
        }
        TranscriptionError::ProviderNotConfigured(_) => {
            (StatusCode::BAD_REQUEST, "Provider not configured")
        }
        TranscriptionError::Staging(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to transcribe audio")
        }
    }
}

pub fn transcription_error_body(e: &TranscriptionError) -> ErrorResponse {
    let (_, category) = transcription_status(e);
    ErrorResponse::new(category, Some(e.to_string()))
}

pub fn transcription_error_response(e: &TranscriptionError) -> Response {
    let (status, _) = transcription_status(e);
    let mut response = (status, Json(transcription_error_body(e))).into_response();

    if let TranscriptionError::RateLimited {
        retry_after_secs: Some(secs),
        ..
    } = e
    {
        if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
            response.headers_mut().insert(RETRY_AFTER, value);
        }
    }

    response
}

pub fn repository_error_response(e: &RepositoryError) -> Response {
    tracing::error!(error = %e, "History repository failure");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "History storage failed",
        Some(e.to_string()),
    )
}

pub fn staging_error_response(e: &StagingStoreError) -> Response {
    tracing::error!(error = %e, "Audio storage failure");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Audio storage failed",
        Some(e.to_string()),
    )
}

use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::application::services::TranscribeRequest;
use crate::domain::{ApiKey, Provider};

use super::error_response::error_response;

pub const API_KEY_HEADER: &str = "x-api-key";

/// File and options pulled out of a transcription upload.
#[derive(Debug)]
pub struct UploadForm {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub data: Bytes,
    pub provider: Option<Provider>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadFormError {
    #[error("no audio file provided")]
    MissingFile,
    #[error("{0}")]
    InvalidProvider(String),
    #[error("failed to read multipart: {0}")]
    Multipart(#[from] MultipartError),
}

impl IntoResponse for UploadFormError {
    fn into_response(self) -> Response {
        match &self {
            UploadFormError::MissingFile => {
                error_response(StatusCode::BAD_REQUEST, "No audio file provided", None)
            }
            UploadFormError::InvalidProvider(reason) => {
                error_response(StatusCode::BAD_REQUEST, "Invalid provider", Some(reason.clone()))
            }
            UploadFormError::Multipart(e) => {
                let status = e.status();
                let error = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "Audio file too large"
                } else {
                    "Invalid upload"
                };
                error_response(status, error, Some(e.body_text()))
            }
        }
    }
}

impl UploadForm {
    /// Takes the `audio` field, or the first field carrying a file name,
    /// plus an optional `provider` text field.
    pub async fn read(mut multipart: Multipart) -> Result<Self, UploadFormError> {
        let mut file: Option<(String, Option<String>, Bytes)> = None;
        let mut provider = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            if name == "provider" {
                let raw = field.text().await?;
                if !raw.trim().is_empty() {
                    provider = Some(
                        raw.parse::<Provider>()
                            .map_err(UploadFormError::InvalidProvider)?,
                    );
                }
                continue;
            }

            let is_file = name == "audio" || field.file_name().is_some();
            if !is_file || file.is_some() {
                continue;
            }

            let file_name = field
                .file_name()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or("audio")
                .to_string();
            let mime_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?;

            tracing::debug!(file_name = %file_name, mime_type = ?mime_type, bytes = data.len(), "Audio upload received");
            file = Some((file_name, mime_type, data));
        }

        let (file_name, mime_type, data) = file.ok_or(UploadFormError::MissingFile)?;
        Ok(Self {
            file_name,
            mime_type,
            data,
            provider,
        })
    }

    pub fn into_request(self, api_key: Option<ApiKey>) -> TranscribeRequest {
        TranscribeRequest {
            file_name: self.file_name,
            mime_type: self.mime_type,
            data: self.data,
            provider: self.provider,
            api_key,
        }
    }
}

/// `x-api-key` first, then `Authorization: Bearer`.
pub fn api_key_from_headers(headers: &HeaderMap) -> Option<ApiKey> {
    if let Some(key) = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(ApiKey::parse)
    {
        return Some(key);
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .and_then(ApiKey::parse)
}

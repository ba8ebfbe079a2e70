use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde::Deserialize;

use crate::application::ports::{ProviderTranscript, TranscriptionError};
use crate::domain::Provider;

/// Status, `Retry-After` and body of a provider reply, read off the wire
/// before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub retry_after_secs: Option<u64>,
    pub body: Bytes,
}

pub async fn read_raw(
    provider: Provider,
    response: reqwest::Response,
) -> Result<RawResponse, TranscriptionError> {
    let status = response.status().as_u16();
    let retry_after_secs = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());

    let body = response
        .bytes()
        .await
        .map_err(|e| TranscriptionError::Transport {
            provider,
            reason: format!("body: {}", e),
        })?;

    Ok(RawResponse {
        status,
        retry_after_secs,
        body,
    })
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    details: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    reason: Option<String>,
}

#[derive(Deserialize)]
struct WhisperVerboseResponse {
    text: Option<String>,
    language: Option<String>,
    duration: Option<f64>,
}

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

fn error_body(body: &[u8]) -> Option<ErrorBody> {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error)
}

fn classify_failure(provider: Provider, raw: &RawResponse) -> TranscriptionError {
    let error = error_body(&raw.body);
    let key_rejected = error
        .as_ref()
        .is_some_and(|e| e.details.iter().any(|d| d.reason.as_deref() == Some("API_KEY_INVALID")));

    match StatusCode::from_u16(raw.status).unwrap_or(StatusCode::BAD_GATEWAY) {
        StatusCode::TOO_MANY_REQUESTS => TranscriptionError::RateLimited {
            provider,
            retry_after_secs: raw.retry_after_secs,
        },
        StatusCode::UNAUTHORIZED => TranscriptionError::InvalidCredential(provider),
        StatusCode::FORBIDDEN if provider == Provider::Gemini => {
            TranscriptionError::InvalidCredential(provider)
        }
        StatusCode::BAD_REQUEST if provider == Provider::Gemini && key_rejected => {
            TranscriptionError::InvalidCredential(provider)
        }
        StatusCode::PAYLOAD_TOO_LARGE => TranscriptionError::PayloadTooLarge(provider),
        _ => TranscriptionError::Provider {
            provider,
            status: raw.status,
            message: error.and_then(|e| e.message),
        },
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn non_blank(provider: Provider, text: Option<String>) -> Result<String, TranscriptionError> {
    match text.map(|t| t.trim().to_string()) {
        Some(t) if !t.is_empty() => Ok(t),
        _ => Err(TranscriptionError::NoTextReturned(provider)),
    }
}

/// Decodes an OpenAI or Azure `verbose_json` transcription reply.
pub fn decode_whisper_response(
    provider: Provider,
    raw: &RawResponse,
) -> Result<ProviderTranscript, TranscriptionError> {
    if !is_success(raw.status) {
        return Err(classify_failure(provider, raw));
    }

    let parsed: WhisperVerboseResponse =
        serde_json::from_slice(&raw.body).map_err(|e| TranscriptionError::InvalidResponse {
            provider,
            reason: e.to_string(),
        })?;

    Ok(ProviderTranscript {
        text: non_blank(provider, parsed.text)?,
        language: parsed.language.filter(|l| !l.trim().is_empty()),
        duration: parsed.duration.filter(|d| d.is_finite() && *d > 0.0),
    })
}

/// Decodes a Gemini `generateContent` reply. Only the first part of the
/// first candidate carries the transcript.
pub fn decode_gemini_response(raw: &RawResponse) -> Result<ProviderTranscript, TranscriptionError> {
    let provider = Provider::Gemini;
    if !is_success(raw.status) {
        return Err(classify_failure(provider, raw));
    }

    let parsed: GeminiResponse =
        serde_json::from_slice(&raw.body).map_err(|e| TranscriptionError::InvalidResponse {
            provider,
            reason: e.to_string(),
        })?;

    let text = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text);

    Ok(ProviderTranscript {
        text: non_blank(provider, text)?,
        language: None,
        duration: None,
    })
}

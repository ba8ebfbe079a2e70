use async_trait::async_trait;

use crate::domain::{ApiKey, AudioUpload, Provider, ValidationError};

use super::{ProgressReporter, StagingStoreError};

/// Text and metadata decoded from one provider response.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderTranscript {
    pub text: String,
    pub language: Option<String>,
    pub duration: Option<f64>,
}

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    fn provider(&self) -> Provider;

    async fn transcribe(
        &self,
        upload: &AudioUpload,
        api_key: &ApiKey,
        progress: &ProgressReporter,
    ) -> Result<ProviderTranscript, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no API key configured for {0}")]
    MissingCredential(Provider),
    #[error("invalid API key - please check your {0} API key")]
    InvalidCredential(Provider),
    #[error("{provider} API rate limit exceeded - please wait a moment and try again")]
    RateLimited {
        provider: Provider,
        retry_after_secs: Option<u64>,
    },
    #[error("audio file too large for {0}")]
    PayloadTooLarge(Provider),
    #[error("{provider} API error (status {status}){}", detail_suffix(.message))]
    Provider {
        provider: Provider,
        status: u16,
        message: Option<String>,
    },
    #[error("{0} returned no transcription text")]
    NoTextReturned(Provider),
    #[error("invalid response from {provider}: {reason}")]
    InvalidResponse { provider: Provider, reason: String },
    #[error("request to {provider} failed: {reason}")]
    Transport { provider: Provider, reason: String },
    #[error("provider {0} is not configured on this server")]
    ProviderNotConfigured(Provider),
    #[error("staging failed: {0}")]
    Staging(#[from] StagingStoreError),
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

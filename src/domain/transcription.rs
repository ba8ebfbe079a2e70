use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::transcription_id::TranscriptionId;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("transcript text is empty")]
    EmptyTranscript,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcription {
    pub id: TranscriptionId,
    pub file_name: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl Transcription {
    pub fn new(
        id: TranscriptionId,
        file_name: impl Into<String>,
        text: &str,
    ) -> Result<Self, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::EmptyTranscript);
        }

        Ok(Self {
            id,
            file_name: file_name.into(),
            text: text.to_string(),
            timestamp: Utc::now(),
            language: None,
            audio_url: None,
            duration: None,
        })
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_duration(mut self, duration: Option<f64>) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_audio_url(mut self, audio_url: impl Into<String>) -> Self {
        self.audio_url = Some(audio_url.into());
        self
    }
}

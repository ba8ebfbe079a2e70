use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{
    ProgressReporter, ProviderTranscript, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{ApiKey, AudioUpload, ProgressStage, Provider};

use super::response_decoder::{decode_whisper_response, read_raw};
use super::upload_body::progress_body;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_WHISPER_MODEL: &str = "whisper-1";

/// Multipart form shared by OpenAI and Azure Whisper endpoints.
pub(super) fn whisper_form(
    provider: Provider,
    upload: &AudioUpload,
    model: Option<&str>,
    progress: &ProgressReporter,
) -> Result<multipart::Form, TranscriptionError> {
    let body = progress_body(upload.data.clone(), progress.clone());
    let file_part = multipart::Part::stream_with_length(body, upload.size())
        .file_name(upload.file_name.clone())
        .mime_str(upload.format.provider_mime())
        .map_err(|e| TranscriptionError::Transport {
            provider,
            reason: format!("mime: {}", e),
        })?;

    let mut form = multipart::Form::new();
    if let Some(model) = model {
        form = form.text("model", model.to_string());
    }
    Ok(form
        .text("response_format", "verbose_json")
        .part("file", file_part))
}

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(client: reqwest::Client, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_WHISPER_MODEL.to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    #[tracing::instrument(skip_all, fields(model = %self.model, bytes = upload.size()))]
    async fn transcribe(
        &self,
        upload: &AudioUpload,
        api_key: &ApiKey,
        progress: &ProgressReporter,
    ) -> Result<ProviderTranscript, TranscriptionError> {
        let provider = Provider::OpenAi;
        let url = format!("{}/audio/transcriptions", self.base_url);
        let form = whisper_form(provider, upload, Some(&self.model), progress)?;

        tracing::debug!("Sending audio to OpenAI Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose())
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::Transport {
                provider,
                reason: e.to_string(),
            })?;

        progress.report(ProgressStage::Decoding, None);
        let raw = read_raw(provider, response).await?;
        let transcript = decode_whisper_response(provider, &raw)?;

        tracing::info!(
            chars = transcript.text.chars().count(),
            "OpenAI Whisper transcription completed"
        );

        Ok(transcript)
    }
}

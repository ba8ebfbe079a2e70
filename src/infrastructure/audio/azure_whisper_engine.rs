use async_trait::async_trait;

use crate::application::ports::{
    ProgressReporter, ProviderTranscript, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{ApiKey, AudioUpload, ProgressStage, Provider};

use super::openai_whisper_engine::whisper_form;
use super::response_decoder::{decode_whisper_response, read_raw};

pub const DEFAULT_AZURE_API_VERSION: &str = "2024-06-01";

pub struct AzureWhisperEngine {
    client: reqwest::Client,
    endpoint: String,
}

impl AzureWhisperEngine {
    pub fn new(client: reqwest::Client, base_url: &str, deployment: &str, api_version: &str) -> Self {
        let endpoint = format!(
            "{}/openai/deployments/{}/audio/transcriptions?api-version={}",
            base_url.trim_end_matches('/'),
            deployment,
            api_version,
        );
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranscriptionEngine for AzureWhisperEngine {
    fn provider(&self) -> Provider {
        Provider::Azure
    }

    #[tracing::instrument(skip_all, fields(bytes = upload.size()))]
    async fn transcribe(
        &self,
        upload: &AudioUpload,
        api_key: &ApiKey,
        progress: &ProgressReporter,
    ) -> Result<ProviderTranscript, TranscriptionError> {
        let provider = Provider::Azure;
        // The deployment fixes the model.
        let form = whisper_form(provider, upload, None, progress)?;

        tracing::debug!(endpoint = %self.endpoint, "Sending audio to Azure OpenAI Whisper");

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", api_key.expose())
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
            "Azure OpenAI Whisper transcription completed"
        );

        Ok(transcript)
    }
}

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use crate::application::ports::{
    ProgressReporter, ProviderTranscript, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{ApiKey, AudioUpload, ProgressStage, Provider};

use super::response_decoder::{decode_gemini_response, read_raw};
use super::upload_body::progress_body;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_PROMPT: &str = "Please transcribe this audio file to text. Provide only the transcribed text without any additional explanation or formatting.";

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 2],
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

pub struct GeminiEngine {
    client: reqwest::Client,
    base_url: String,
    model: String,
    prompt: String,
}

impl GeminiEngine {
    pub fn new(
        client: reqwest::Client,
        base_url: Option<String>,
        model: Option<String>,
        prompt: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            prompt: prompt
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_GEMINI_PROMPT.to_string()),
        }
    }

    fn request_body(&self, upload: &AudioUpload) -> Result<Bytes, TranscriptionError> {
        let request = GenerateContentRequest {
            contents: [Content {
                parts: [
                    Part::Text { text: &self.prompt },
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: upload.format.provider_mime(),
                            data: general_purpose::STANDARD.encode(&upload.data),
                        },
                    },
                ],
            }],
        };

        serde_json::to_vec(&request)
            .map(Bytes::from)
            .map_err(|e| TranscriptionError::Transport {
                provider: Provider::Gemini,
                reason: format!("encode request: {}", e),
            })
    }
}

#[async_trait]
impl TranscriptionEngine for GeminiEngine {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    #[tracing::instrument(skip_all, fields(model = %self.model, bytes = upload.size()))]
    async fn transcribe(
        &self,
        upload: &AudioUpload,
        api_key: &ApiKey,
        progress: &ProgressReporter,
    ) -> Result<ProviderTranscript, TranscriptionError> {
        let provider = Provider::Gemini;
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);

        progress.report(ProgressStage::Encoding, None);
        let body = self.request_body(upload)?;
        let body_len = body.len();

        tracing::debug!(request_bytes = body_len, "Sending audio to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key.expose())
            .header(CONTENT_TYPE, "application/json")
            .body(progress_body(body, progress.clone()))
            .send()
            .await
            .map_err(|e| TranscriptionError::Transport {
                provider,
                reason: e.to_string(),
            })?;

        progress.report(ProgressStage::Decoding, None);
        let raw = read_raw(provider, response).await?;
        let transcript = decode_gemini_response(&raw)?;

        tracing::info!(
            chars = transcript.text.chars().count(),
            "Gemini transcription completed"
        );

        Ok(transcript)
    }
}

use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::Provider;

use super::azure_whisper_engine::{AzureWhisperEngine, DEFAULT_AZURE_API_VERSION};
use super::gemini_engine::GeminiEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

/// Endpoint settings for every provider. Credentials travel per request.
#[derive(Debug, Clone, Default)]
pub struct EngineEndpoints {
    pub openai_base_url: Option<String>,
    pub openai_model: Option<String>,
    pub gemini_base_url: Option<String>,
    pub gemini_model: Option<String>,
    pub gemini_prompt: Option<String>,
    pub azure_endpoint: Option<String>,
    pub azure_deployment: Option<String>,
    pub azure_api_version: Option<String>,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        provider: Provider,
        endpoints: &EngineEndpoints,
        client: reqwest::Client,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match provider {
            Provider::OpenAi => Ok(Arc::new(OpenAiWhisperEngine::new(
                client,
                endpoints.openai_base_url.clone(),
                endpoints.openai_model.clone(),
            ))),
            Provider::Gemini => Ok(Arc::new(GeminiEngine::new(
                client,
                endpoints.gemini_base_url.clone(),
                endpoints.gemini_model.clone(),
                endpoints.gemini_prompt.clone(),
            ))),
            Provider::Azure => {
                let endpoint = non_empty(&endpoints.azure_endpoint)
                    .ok_or(TranscriptionError::ProviderNotConfigured(provider))?;
                let deployment = non_empty(&endpoints.azure_deployment)
                    .ok_or(TranscriptionError::ProviderNotConfigured(provider))?;
                let api_version =
                    non_empty(&endpoints.azure_api_version).unwrap_or(DEFAULT_AZURE_API_VERSION);
                Ok(Arc::new(AzureWhisperEngine::new(
                    client,
                    endpoint,
                    deployment,
                    api_version,
                )))
            }
        }
    }

    /// Every engine whose endpoint settings are complete.
    pub fn create_available(
        endpoints: &EngineEndpoints,
        client: reqwest::Client,
    ) -> Vec<Arc<dyn TranscriptionEngine>> {
        [Provider::OpenAi, Provider::Azure, Provider::Gemini]
            .into_iter()
            .filter_map(|provider| match Self::create(provider, endpoints, client.clone()) {
                Ok(engine) => Some(engine),
                Err(e) => {
                    tracing::debug!(provider = %provider, error = %e, "Provider unavailable");
                    None
                }
            })
            .collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

use std::collections::HashMap;
use std::path::PathBuf;

use config::{Config, ConfigError, File};
use config::Environment as EnvironmentSource;
use serde::Deserialize;

use crate::domain::{ApiKey, DEFAULT_HISTORY_CAPACITY, Provider};
use crate::infrastructure::audio::{
    DEFAULT_AZURE_API_VERSION, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
    DEFAULT_GEMINI_PROMPT, DEFAULT_OPENAI_BASE_URL, DEFAULT_WHISPER_MODEL, EngineEndpoints,
};
use crate::infrastructure::persistence::HistoryBackend;

use super::Environment;

const MEGABYTE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub transcription: TranscriptionSettings,
    pub upload: UploadSettings,
    pub history: HistorySettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranscriptionSettings {
    pub provider: Provider,
    pub timeout_secs: u64,
    pub openai: OpenAiSettings,
    pub gemini: GeminiSettings,
    pub azure: AzureSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiSettings {
    pub api_key: Secret,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: Secret,
    pub base_url: String,
    pub model: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AzureSettings {
    pub api_key: Secret,
    pub endpoint: String,
    pub deployment: String,
    pub api_version: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    pub max_file_size_mb: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistorySettings {
    pub backend: HistoryBackend,
    pub path: PathBuf,
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub local_path: PathBuf,
    pub retain_audio: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

/// A configured key. Debug output never shows the value.
#[derive(Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.trim().is_empty() {
            f.write_str("Secret(<unset>)")
        } else {
            f.write_str("Secret(<redacted>)")
        }
    }
}

impl Settings {
    /// Defaults, then `appsettings.{environment}`, then `APP__SECTION__KEY`
    /// variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Self::load_from(&format!("appsettings.{}", environment.as_str()))
    }

    pub fn load_from(file_name: &str) -> Result<Self, ConfigError> {
        let configuration = Self::with_defaults(Config::builder())?
            .add_source(File::with_name(file_name).required(false))
            .add_source(
                EnvironmentSource::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let env_or_empty = |name: &str| std::env::var(name).unwrap_or_default();

        builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("transcription.provider", "openai")?
            .set_default("transcription.timeout_secs", 300)?
            .set_default("transcription.openai.api_key", env_or_empty("OPENAI_API_KEY"))?
            .set_default("transcription.openai.base_url", DEFAULT_OPENAI_BASE_URL)?
            .set_default("transcription.openai.model", DEFAULT_WHISPER_MODEL)?
            .set_default("transcription.gemini.api_key", env_or_empty("GEMINI_API_KEY"))?
            .set_default("transcription.gemini.base_url", DEFAULT_GEMINI_BASE_URL)?
            .set_default("transcription.gemini.model", DEFAULT_GEMINI_MODEL)?
            .set_default("transcription.gemini.prompt", DEFAULT_GEMINI_PROMPT)?
            .set_default("transcription.azure.api_key", env_or_empty("AZURE_OPENAI_API_KEY"))?
            .set_default("transcription.azure.endpoint", "")?
            .set_default("transcription.azure.deployment", "")?
            .set_default("transcription.azure.api_version", DEFAULT_AZURE_API_VERSION)?
            .set_default("upload.max_file_size_mb", 25)?
            .set_default("history.backend", "file")?
            .set_default("history.path", "data/transcription-history.json")?
            .set_default("history.capacity", DEFAULT_HISTORY_CAPACITY as u64)?
            .set_default("storage.local_path", "data/uploads")?
            .set_default("storage.retain_audio", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.upload.max_file_size_mb.saturating_mul(MEGABYTE)
    }

    /// Server-side keys, one per provider that has a non-blank key.
    pub fn configured_credentials(&self) -> HashMap<Provider, ApiKey> {
        let t = &self.transcription;
        [
            (Provider::OpenAi, t.openai.api_key.expose()),
            (Provider::Gemini, t.gemini.api_key.expose()),
            (Provider::Azure, t.azure.api_key.expose()),
        ]
        .into_iter()
        .filter_map(|(provider, raw)| ApiKey::parse(raw).map(|key| (provider, key)))
        .collect()
    }
}

impl TranscriptionSettings {
    pub fn engine_endpoints(&self) -> EngineEndpoints {
        EngineEndpoints {
            openai_base_url: Some(self.openai.base_url.clone()),
            openai_model: Some(self.openai.model.clone()),
            gemini_base_url: Some(self.gemini.base_url.clone()),
            gemini_model: Some(self.gemini.model.clone()),
            gemini_prompt: Some(self.gemini.prompt.clone()),
            azure_endpoint: Some(self.azure.endpoint.clone()),
            azure_deployment: Some(self.azure.deployment.clone()),
            azure_api_version: Some(self.azure.api_version.clone()),
        }
    }
}

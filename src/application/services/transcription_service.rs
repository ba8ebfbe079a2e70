use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream;

use crate::application::ports::{
    AudioProbe, HistoryRepository, ProgressReporter, StagingStore, StagingStoreError,
    TranscriptionEngine, TranscriptionError,
};
use crate::domain::{
    ApiKey, AudioUpload, ProgressStage, Provider, StoragePath, Transcription, TranscriptionId,
    detect_language, language_display_name,
};
use crate::infrastructure::observability::log_preview;

const PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone)]
pub struct TranscriptionOptions {
    pub default_provider: Provider,
    pub max_file_size_bytes: u64,
    pub retain_audio: bool,
}

#[derive(Debug, Clone)]
pub struct TranscribeRequest {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub data: Bytes,
    pub provider: Option<Provider>,
    pub api_key: Option<ApiKey>,
}

pub struct TranscriptionService {
    engines: HashMap<Provider, Arc<dyn TranscriptionEngine>>,
    credentials: HashMap<Provider, ApiKey>,
    staging_store: Arc<dyn StagingStore>,
    history: Arc<dyn HistoryRepository>,
    probe: Arc<dyn AudioProbe>,
    options: TranscriptionOptions,
}

impl TranscriptionService {
    pub fn new(
        engines: Vec<Arc<dyn TranscriptionEngine>>,
        credentials: HashMap<Provider, ApiKey>,
        staging_store: Arc<dyn StagingStore>,
        history: Arc<dyn HistoryRepository>,
        probe: Arc<dyn AudioProbe>,
        options: TranscriptionOptions,
    ) -> Self {
        let engines = engines
            .into_iter()
            .map(|engine| (engine.provider(), engine))
            .collect();

        Self {
            engines,
            credentials,
            staging_store,
            history,
            probe,
            options,
        }
    }

    pub fn default_provider(&self) -> Provider {
        self.options.default_provider
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        self.options.max_file_size_bytes
    }

    pub fn credential_configured(&self, provider: Provider) -> bool {
        self.credentials.contains_key(&provider)
    }

    pub fn retains_audio(&self) -> bool {
        self.options.retain_audio
    }

    #[tracing::instrument(
        skip(self, request, progress),
        fields(file_name = %request.file_name, bytes = request.data.len())
    )]
    pub async fn transcribe(
        &self,
        request: TranscribeRequest,
        progress: &ProgressReporter,
    ) -> Result<Transcription, TranscriptionError> {
        let result = self.run(request, progress).await;
        match &result {
            Ok(_) => progress.report(ProgressStage::Complete, Some(100)),
            Err(e) => {
                tracing::warn!(error = %e, "Transcription failed");
                progress.report(ProgressStage::Failed, None);
            }
        }
        result
    }

    async fn run(
        &self,
        request: TranscribeRequest,
        progress: &ProgressReporter,
    ) -> Result<Transcription, TranscriptionError> {
        let provider = request.provider.unwrap_or(self.options.default_provider);
        let engine = self
            .engines
            .get(&provider)
            .cloned()
            .ok_or(TranscriptionError::ProviderNotConfigured(provider))?;

        let api_key = request
            .api_key
            .or_else(|| self.credentials.get(&provider).cloned())
            .ok_or(TranscriptionError::MissingCredential(provider))?;

        progress.report(ProgressStage::Validating, None);
        let limit = self
            .options
            .max_file_size_bytes
            .min(provider.max_upload_bytes());
        let upload = AudioUpload::validate(
            &request.file_name,
            request.mime_type.as_deref(),
            request.data,
            limit,
        )?;
        progress.report(ProgressStage::FileAccepted, Some(0));

        let id = TranscriptionId::new();
        let path = StoragePath::new(&id, &upload.file_name);

        progress.report(ProgressStage::Staging, None);
        self.stage(&path, &upload).await?;

        tracing::info!(provider = %provider, format = %upload.format, "Sending audio to provider");
        let outcome = engine.transcribe(&upload, &api_key, progress).await;

        let keep_audio = self.options.retain_audio && outcome.is_ok();
        if !keep_audio {
            self.discard_staged(&path).await;
        }

        let transcript = outcome?;

        let language = match transcript.language.as_deref().filter(|l| !l.trim().is_empty()) {
            Some(reported) => language_display_name(reported),
            None => detect_language(&transcript.text).to_string(),
        };

        let duration = match transcript.duration {
            Some(secs) => Some(secs),
            None => self.probe_duration(&upload).await,
        };

        let mut transcription = match Transcription::new(id, upload.file_name.clone(), &transcript.text) {
            Ok(transcription) => transcription.with_language(language).with_duration(duration),
            Err(_) => {
                if keep_audio {
                    self.discard_staged(&path).await;
                }
                return Err(TranscriptionError::NoTextReturned(provider));
            }
        };

        if keep_audio {
            let url = format!("/api/audio/{}", transcription.id);
            transcription = transcription.with_audio_url(url);
        }

        tracing::info!(
            id = %transcription.id,
            language = transcription.language.as_deref().unwrap_or_default(),
            preview = %log_preview(&transcription.text, PREVIEW_CHARS),
            "Transcription completed"
        );

        if let Err(e) = self.history.append(transcription.clone()).await {
            tracing::error!(error = %e, id = %transcription.id, "Failed to append transcription to history");
        }

        Ok(transcription)
    }

    async fn stage(&self, path: &StoragePath, upload: &AudioUpload) -> Result<u64, StagingStoreError> {
        let chunk = upload.data.clone();
        let body = stream::once(async move { Ok::<_, io::Error>(chunk) });
        let written = self
            .staging_store
            .store(path, Box::pin(body), Some(upload.size()))
            .await?;
        tracing::debug!(path = %path, bytes = written, "Staged upload");
        Ok(written)
    }

    async fn discard_staged(&self, path: &StoragePath) {
        if let Err(e) = self.staging_store.delete(path).await {
            tracing::warn!(path = %path, error = %e, "Failed to delete staged audio");
        }
    }

    async fn probe_duration(&self, upload: &AudioUpload) -> Option<f64> {
        let probe = Arc::clone(&self.probe);
        let data = upload.data.clone();
        let format = upload.format;
        match tokio::task::spawn_blocking(move || probe.duration_secs(data, format)).await {
            Ok(duration) => duration,
            Err(e) => {
                tracing::warn!(error = %e, "Duration probe task failed");
                None
            }
        }
    }

    /// Retained audio for a transcription, with its file name.
    pub async fn retained_audio(
        &self,
        id: &TranscriptionId,
    ) -> Result<Option<(StoragePath, Bytes)>, StagingStoreError> {
        if !self.options.retain_audio {
            return Ok(None);
        }
        let Some(path) = self
            .staging_store
            .list_prefix(id.as_str())
            .await?
            .into_iter()
            .next()
        else {
            return Ok(None);
        };
        match self.staging_store.fetch(&path).await {
            Ok(data) => Ok(Some((path, data))),
            Err(StagingStoreError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

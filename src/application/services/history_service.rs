use std::sync::Arc;

use chrono::Utc;

use crate::application::ports::{HistoryRepository, RepositoryError, StagingStore};
use crate::domain::{
    HistoryPage, HistoryQuery, Transcription, TranscriptionId, export,
};

/// A rendered text download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextExport {
    pub file_name: String,
    pub content: String,
}

pub struct HistoryService {
    repository: Arc<dyn HistoryRepository>,
    staging_store: Arc<dyn StagingStore>,
}

impl HistoryService {
    pub fn new(repository: Arc<dyn HistoryRepository>, staging_store: Arc<dyn StagingStore>) -> Self {
        Self {
            repository,
            staging_store,
        }
    }

    pub async fn query(&self, query: &HistoryQuery) -> Result<HistoryPage, RepositoryError> {
        let entries = self.repository.list().await?;
        Ok(query.apply(entries, Utc::now()))
    }

    pub async fn get(&self, id: &TranscriptionId) -> Result<Option<Transcription>, RepositoryError> {
        self.repository.get(id).await
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    pub async fn remove(&self, id: &TranscriptionId) -> Result<bool, RepositoryError> {
        let removed = self.repository.remove(id).await?;
        if removed {
            self.discard_audio(id).await;
        }
        Ok(removed)
    }

    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn remove_many(&self, ids: &[TranscriptionId]) -> Result<usize, RepositoryError> {
        let removed = self.repository.remove_many(ids).await?;
        for id in ids {
            self.discard_audio(id).await;
        }
        Ok(removed)
    }

    #[tracing::instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        let entries = self.repository.list().await?;
        self.repository.clear().await?;
        for entry in entries.iter().filter(|e| e.audio_url.is_some()) {
            self.discard_audio(&entry.id).await;
        }
        Ok(())
    }

    pub async fn export_one(&self, id: &TranscriptionId) -> Result<Option<TextExport>, RepositoryError> {
        Ok(self.repository.get(id).await?.map(|entry| TextExport {
            file_name: export::export_file_name(&entry.file_name),
            content: export::render_transcript(&entry),
        }))
    }

    /// Entries keep history order. Unknown ids are skipped.
    pub async fn export_many(&self, ids: &[TranscriptionId]) -> Result<Option<TextExport>, RepositoryError> {
        let entries: Vec<Transcription> = self
            .repository
            .list()
            .await?
            .into_iter()
            .filter(|entry| ids.contains(&entry.id))
            .collect();

        if entries.is_empty() {
            return Ok(None);
        }

        Ok(Some(TextExport {
            file_name: export::bulk_export_file_name(Utc::now().date_naive()),
            content: export::render_bulk(&entries),
        }))
    }

    async fn discard_audio(&self, id: &TranscriptionId) {
        let paths = match self.staging_store.list_prefix(id.as_str()).await {
            Ok(paths) => paths,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Failed to list retained audio");
                return;
            }
        };
        for path in paths {
            if let Err(e) = self.staging_store.delete(&path).await {
                tracing::warn!(path = %path, error = %e, "Failed to delete retained audio");
            }
        }
    }
}

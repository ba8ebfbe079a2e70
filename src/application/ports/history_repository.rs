use async_trait::async_trait;

use crate::domain::{Transcription, TranscriptionId};

use super::RepositoryError;

/// Newest-first, capped store of finished transcriptions.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Transcription>, RepositoryError>;

    async fn get(&self, id: &TranscriptionId) -> Result<Option<Transcription>, RepositoryError>;

    async fn append(&self, entry: Transcription) -> Result<(), RepositoryError>;

    async fn remove(&self, id: &TranscriptionId) -> Result<bool, RepositoryError>;

    async fn remove_many(&self, ids: &[TranscriptionId]) -> Result<usize, RepositoryError>;

    async fn clear(&self) -> Result<(), RepositoryError>;
}

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{HistoryRepository, RepositoryError};
use crate::domain::{Transcription, TranscriptionId, insert_capped};

pub struct InMemoryHistoryRepository {
    entries: RwLock<Vec<Transcription>>,
    capacity: usize,
}

impl InMemoryHistoryRepository {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn list(&self) -> Result<Vec<Transcription>, RepositoryError> {
        Ok(self.entries.read().await.clone())
    }

    async fn get(&self, id: &TranscriptionId) -> Result<Option<Transcription>, RepositoryError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|entry| &entry.id == id)
            .cloned())
    }

    async fn append(&self, entry: Transcription) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        insert_capped(&mut entries, entry, self.capacity);
        Ok(())
    }

    async fn remove(&self, id: &TranscriptionId) -> Result<bool, RepositoryError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|entry| &entry.id != id);
        Ok(entries.len() != before)
    }

    async fn remove_many(&self, ids: &[TranscriptionId]) -> Result<usize, RepositoryError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|entry| !ids.contains(&entry.id));
        Ok(before - entries.len())
    }

    async fn clear(&self) -> Result<(), RepositoryError> {
        self.entries.write().await.clear();
        Ok(())
    }
}

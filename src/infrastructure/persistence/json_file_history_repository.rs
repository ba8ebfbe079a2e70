use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{HistoryRepository, RepositoryError};
use crate::domain::{Transcription, TranscriptionId, insert_capped};

/// History kept as one JSON array on disk, newest first.
///
/// Read-modify-write cycles are serialized by an in-process lock and each
/// write lands through a temp file and a rename, so a crash never leaves a
/// half-written array behind. Separate processes sharing the file are not
/// coordinated.
pub struct JsonFileHistoryRepository {
    path: PathBuf,
    capacity: usize,
    lock: Mutex<()>,
}

impl JsonFileHistoryRepository {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity: capacity.max(1),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<Transcription>, RepositoryError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RepositoryError::StorageFailed(e.to_string())),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let mut entries: Vec<Transcription> = serde_json::from_slice(&raw)
            .map_err(|e| RepositoryError::Corrupted(format!("{}: {}", self.path.display(), e)))?;
        entries.truncate(self.capacity);
        Ok(entries)
    }

    async fn save(&self, entries: &[Transcription]) -> Result<(), RepositoryError> {
        let json = serde_json::to_vec_pretty(entries)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| RepositoryError::StorageFailed(e.to_string()))?;
        }

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| RepositoryError::StorageFailed(e.to_string()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| RepositoryError::StorageFailed(e.to_string()))
    }
}

#[async_trait]
impl HistoryRepository for JsonFileHistoryRepository {
    async fn list(&self) -> Result<Vec<Transcription>, RepositoryError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    async fn get(&self, id: &TranscriptionId) -> Result<Option<Transcription>, RepositoryError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.into_iter().find(|entry| &entry.id == id))
    }

    #[tracing::instrument(skip(self, entry), fields(id = %entry.id, path = %self.path.display()))]
    async fn append(&self, entry: Transcription) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        insert_capped(&mut entries, entry, self.capacity);
        self.save(&entries).await?;
        tracing::debug!(entries = entries.len(), "History saved");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn remove(&self, id: &TranscriptionId) -> Result<bool, RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let before = entries.len();
        entries.retain(|entry| &entry.id != id);
        if entries.len() == before {
            return Ok(false);
        }
        self.save(&entries).await?;
        Ok(true)
    }

    #[tracing::instrument(skip(self, ids), fields(count = ids.len()))]
    async fn remove_many(&self, ids: &[TranscriptionId]) -> Result<usize, RepositoryError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        let before = entries.len();
        entries.retain(|entry| !ids.contains(&entry.id));
        let removed = before - entries.len();
        if removed > 0 {
            self.save(&entries).await?;
        }
        Ok(removed)
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn clear(&self) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RepositoryError::StorageFailed(e.to_string())),
        }
    }
}

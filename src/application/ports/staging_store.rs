use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::StoragePath;

/// Scratch space for uploaded audio while a provider call is in flight, and
/// for retained audio afterwards.
#[async_trait::async_trait]
pub trait StagingStore: Send + Sync {
    /// Writes the stream and returns the byte count. A known length that
    /// does not match what arrived fails the write.
    async fn store(
        &self,
        path: &StoragePath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
        content_length: Option<u64>,
    ) -> Result<u64, StagingStoreError>;

    async fn fetch(&self, path: &StoragePath) -> Result<Bytes, StagingStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError>;

    /// Paths staged under one transcription id.
    async fn list_prefix(&self, prefix: &str) -> Result<Vec<StoragePath>, StagingStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingStoreError {
    #[error("failed to stage audio: {0}")]
    UploadFailed(String),
    #[error("staged audio not found: {0}")]
    NotFound(String),
    #[error("failed to read staged audio: {0}")]
    DownloadFailed(String),
    #[error("failed to remove staged audio: {0}")]
    DeleteFailed(String),
    #[error("staging io error: {0}")]
    Io(#[from] io::Error),
}

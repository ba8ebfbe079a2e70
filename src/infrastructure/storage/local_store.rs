use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::StoragePath;

/// Staged audio on the local disk, one directory per transcription id.
pub struct LocalStagingStore {
    root: Arc<LocalFileSystem>,
}

impl LocalStagingStore {
    pub fn new(staging_dir: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&staging_dir)?;
        let root = LocalFileSystem::new_with_prefix(&staging_dir)
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;
        tracing::debug!(dir = %staging_dir.display(), "Staging store ready");
        Ok(Self {
            root: Arc::new(root),
        })
    }
}

fn to_store_path(path: &StoragePath) -> StorePath {
    StorePath::parse(path.as_str()).unwrap_or_else(|_| StorePath::from(path.as_str()))
}

fn not_found_or(
    e: object_store::Error,
    other: impl FnOnce(String) -> StagingStoreError,
) -> StagingStoreError {
    match e {
        object_store::Error::NotFound { path, .. } => StagingStoreError::NotFound(path),
        e => other(e.to_string()),
    }
}

/// Pushes every chunk as one part. The caller aborts the upload on error.
async fn write_parts(
    upload: &mut Box<dyn MultipartUpload>,
    mut chunks: BoxStream<'_, Result<Bytes, io::Error>>,
) -> Result<u64, StagingStoreError> {
    let mut written: u64 = 0;
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        written += chunk.len() as u64;
        upload
            .put_part(PutPayload::from(chunk))
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;
    }
    Ok(written)
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    async fn store(
        &self,
        path: &StoragePath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
        content_length: Option<u64>,
    ) -> Result<u64, StagingStoreError> {
        let mut upload = self
            .root
            .put_multipart(&to_store_path(path))
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        let written = match write_parts(&mut upload, stream).await {
            Ok(written) => written,
            Err(e) => {
                let _ = upload.abort().await;
                return Err(e);
            }
        };

        if let Some(expected) = content_length.filter(|expected| *expected != written) {
            let _ = upload.abort().await;
            return Err(StagingStoreError::UploadFailed(format!(
                "{}: expected {} bytes, received {}",
                path, expected, written
            )));
        }

        upload
            .complete()
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        Ok(written)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Bytes, StagingStoreError> {
        let object = self
            .root
            .get(&to_store_path(path))
            .await
            .map_err(|e| not_found_or(e, StagingStoreError::DownloadFailed))?;

        object
            .bytes()
            .await
            .map_err(|e| StagingStoreError::DownloadFailed(e.to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError> {
        self.root
            .delete(&to_store_path(path))
            .await
            .map_err(|e| not_found_or(e, StagingStoreError::DeleteFailed))
    }

    async fn list_prefix(&self, prefix: &str) -> Result<Vec<StoragePath>, StagingStoreError> {
        let prefix = StorePath::from(prefix);
        let staged: Vec<_> = self
            .root
            .list(Some(&prefix))
            .map_ok(|meta| StoragePath::from_raw(meta.location.to_string()))
            .try_collect()
            .await
            .map_err(|e| StagingStoreError::DownloadFailed(e.to_string()))?;

        Ok(staged)
    }
}

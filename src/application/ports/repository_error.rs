#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("storage failed: {0}")]
    StorageFailed(String),
    #[error("history file is corrupted: {0}")]
    Corrupted(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::HistoryRepository;

use super::in_memory_history_repository::InMemoryHistoryRepository;
use super::json_file_history_repository::JsonFileHistoryRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryBackend {
    File,
    Memory,
}

pub struct HistoryRepositoryFactory;

impl HistoryRepositoryFactory {
    pub fn create(
        backend: HistoryBackend,
        path: PathBuf,
        capacity: usize,
    ) -> Arc<dyn HistoryRepository> {
        match backend {
            HistoryBackend::File => {
                tracing::info!(path = %path.display(), capacity, "Using JSON file history");
                Arc::new(JsonFileHistoryRepository::new(path, capacity))
            }
            HistoryBackend::Memory => {
                tracing::info!(capacity, "Using in-memory history");
                Arc::new(InMemoryHistoryRepository::new(capacity))
            }
        }
    }
}

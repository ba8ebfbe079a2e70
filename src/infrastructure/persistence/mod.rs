mod history_repository_factory;
mod in_memory_history_repository;
mod json_file_history_repository;

pub use history_repository_factory::{HistoryBackend, HistoryRepositoryFactory};
pub use in_memory_history_repository::InMemoryHistoryRepository;
pub use json_file_history_repository::JsonFileHistoryRepository;

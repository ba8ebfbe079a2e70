mod audio_probe;
mod history_repository;
mod progress_reporter;
mod repository_error;
mod staging_store;
mod transcription_engine;

pub use audio_probe::AudioProbe;
pub use history_repository::HistoryRepository;
pub use progress_reporter::ProgressReporter;
pub use repository_error::RepositoryError;
pub use staging_store::{StagingStore, StagingStoreError};
pub use transcription_engine::{ProviderTranscript, TranscriptionEngine, TranscriptionError};

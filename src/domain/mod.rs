mod api_key;
mod audio_format;
mod audio_upload;
pub mod export;
mod history;
mod history_query;
mod language;
mod phase;
mod progress;
mod provider;
mod storage_path;
mod transcription;
mod transcription_id;

pub use api_key::ApiKey;
pub use audio_format::AudioFormat;
pub use audio_upload::{AudioUpload, ValidationError};
pub use history::{DEFAULT_HISTORY_CAPACITY, insert_capped};
pub use history_query::{DateRange, HistoryPage, HistoryQuery};
pub use language::{Language, detect_language, language_display_name};
pub use phase::TranscriptionPhase;
pub use progress::{ProgressEvent, ProgressStage};
pub use provider::Provider;
pub use storage_path::StoragePath;
pub use transcription::{DomainError, Transcription};
pub use transcription_id::TranscriptionId;

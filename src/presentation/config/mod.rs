mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AzureSettings, GeminiSettings, HistorySettings, LoggingSettings, OpenAiSettings,
    Secret, ServerSettings, Settings, StorageSettings, TranscriptionSettings, UploadSettings,
};

mod history_service;
mod transcription_service;

pub use history_service::{HistoryService, TextExport};
pub use transcription_service::{TranscribeRequest, TranscriptionOptions, TranscriptionService};

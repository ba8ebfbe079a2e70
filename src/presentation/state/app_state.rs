use std::sync::Arc;

use crate::application::services::{HistoryService, TranscriptionService};

#[derive(Clone)]
pub struct AppState {
    pub transcription_service: Arc<TranscriptionService>,
    pub history_service: Arc<HistoryService>,
}

use serde::Serialize;

use super::phase::TranscriptionPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProgressStage {
    Validating,
    FileAccepted,
    Staging,
    Encoding,
    Uploading,
    AwaitingProvider,
    Decoding,
    Complete,
    Failed,
}

impl ProgressStage {
    pub fn phase(&self) -> TranscriptionPhase {
        match self {
            ProgressStage::Validating => TranscriptionPhase::Idle,
            ProgressStage::FileAccepted => TranscriptionPhase::FileSelected,
            ProgressStage::Staging
            | ProgressStage::Encoding
            | ProgressStage::Uploading
            | ProgressStage::AwaitingProvider
            | ProgressStage::Decoding => TranscriptionPhase::Processing,
            ProgressStage::Complete => TranscriptionPhase::Complete,
            ProgressStage::Failed => TranscriptionPhase::Error,
        }
    }
}

/// `percent` is `None` while the stage is indeterminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub phase: TranscriptionPhase,
    pub stage: ProgressStage,
    pub percent: Option<u8>,
}

impl ProgressEvent {
    pub fn new(stage: ProgressStage, percent: Option<u8>) -> Self {
        Self {
            phase: stage.phase(),
            stage,
            percent: percent.map(|p| p.min(100)),
        }
    }
}

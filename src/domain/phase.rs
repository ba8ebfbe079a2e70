use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TranscriptionPhase {
    Idle,
    FileSelected,
    Processing,
    Complete,
    Error,
}

impl TranscriptionPhase {
    pub fn can_transition_to(&self, next: TranscriptionPhase) -> bool {
        use TranscriptionPhase::*;

        matches!(
            (self, next),
            (Idle, FileSelected)
                | (Idle, Error)
                | (FileSelected, Processing)
                | (FileSelected, Idle)
                | (FileSelected, Error)
                | (Processing, Complete)
                | (Processing, Error)
                | (Complete, Idle)
                | (Error, Idle)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TranscriptionPhase::Complete | TranscriptionPhase::Error)
    }
}

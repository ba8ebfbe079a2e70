use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use crate::domain::{ProgressEvent, ProgressStage, TranscriptionPhase};

/// Pushes progress events onto a bounded channel. A full or closed channel
/// drops the event; progress never blocks the transcription.
#[derive(Clone)]
pub struct ProgressReporter {
    sender: Option<mpsc::Sender<ProgressEvent>>,
    phase: Arc<Mutex<TranscriptionPhase>>,
}

impl ProgressReporter {
    pub fn new(sender: mpsc::Sender<ProgressEvent>) -> Self {
        Self {
            sender: Some(sender),
            phase: Arc::new(Mutex::new(TranscriptionPhase::Idle)),
        }
    }

    pub fn disabled() -> Self {
        Self {
            sender: None,
            phase: Arc::new(Mutex::new(TranscriptionPhase::Idle)),
        }
    }

    pub fn phase(&self) -> TranscriptionPhase {
        self.phase
            .lock()
            .map(|guard| *guard)
            .unwrap_or(TranscriptionPhase::Error)
    }

    pub fn report(&self, stage: ProgressStage, percent: Option<u8>) {
        let next = stage.phase();
        {
            let Ok(mut current) = self.phase.lock() else {
                return;
            };
            if *current != next {
                if !current.can_transition_to(next) {
                    tracing::debug!(from = ?*current, to = ?next, "Ignoring out-of-order progress");
                    return;
                }
                *current = next;
            }
        }

        if let Some(sender) = &self.sender {
            let _ = sender.try_send(ProgressEvent::new(stage, percent));
        }
    }

    /// Byte-level upload progress. Once everything is sent the stage flips to
    /// an indeterminate wait on the provider.
    pub fn report_upload(&self, sent: u64, total: u64) {
        if total == 0 || sent >= total {
            self.report(ProgressStage::Uploading, Some(100));
            self.report(ProgressStage::AwaitingProvider, None);
            return;
        }
        let percent = (sent.saturating_mul(100) / total) as u8;
        self.report(ProgressStage::Uploading, Some(percent));
    }
}

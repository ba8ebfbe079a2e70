use bytes::Bytes;

use crate::domain::AudioFormat;

/// Reads playback length from container metadata. Blocking; run it off the runtime.
pub trait AudioProbe: Send + Sync {
    fn duration_secs(&self, data: Bytes, format: AudioFormat) -> Option<f64>;
}

use std::io::Cursor;

use bytes::Bytes;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::AudioProbe;
use crate::domain::AudioFormat;

/// Reads duration from container headers, or by walking packet timestamps
/// when the header has no frame count.
pub struct SymphoniaAudioProbe;

impl AudioProbe for SymphoniaAudioProbe {
    fn duration_secs(&self, data: Bytes, format: AudioFormat) -> Option<f64> {
        let cursor = Cursor::new(data);
        let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

        let mut hint = Hint::new();
        hint.with_extension(format.extension());

        let probed = match symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        ) {
            Ok(p) => p,
            Err(e) => {
                tracing::debug!(error = %e, format = %format, "Audio probe failed");
                return None;
            }
        };

        let mut reader = probed.format;
        let track = reader.default_track()?;
        let track_id = track.id;
        let params = track.codec_params.clone();

        if let (Some(frames), Some(rate)) = (params.n_frames, params.sample_rate) {
            if rate > 0 {
                return Some(frames as f64 / rate as f64);
            }
        }

        let time_base = params.time_base?;
        let mut end_ts: u64 = 0;
        while let Ok(packet) = reader.next_packet() {
            if packet.track_id() == track_id {
                end_ts = end_ts.max(packet.ts() + packet.dur());
            }
        }
        if end_ts == 0 {
            return None;
        }

        let time = time_base.calc_time(end_ts);
        Some(time.seconds as f64 + time.frac)
    }
}

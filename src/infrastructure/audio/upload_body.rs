use std::io;

use bytes::Bytes;
use futures::{StreamExt, stream};

use crate::application::ports::ProgressReporter;

const CHUNK_SIZE: usize = 64 * 1024;

/// Request body that reports upload progress as the HTTP client pulls chunks.
pub fn progress_body(data: Bytes, progress: ProgressReporter) -> reqwest::Body {
    let total = data.len() as u64;
    let chunks: Vec<Bytes> = (0..data.len())
        .step_by(CHUNK_SIZE)
        .map(|start| data.slice(start..(start + CHUNK_SIZE).min(data.len())))
        .collect();

    progress.report_upload(0, total.max(1));

    let mut sent: u64 = 0;
    let body = stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        progress.report_upload(sent, total);
        Ok::<_, io::Error>(chunk)
    });

    reqwest::Body::wrap_stream(body)
}

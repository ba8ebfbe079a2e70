use chrono::{NaiveDate, SecondsFormat};

use super::transcription::Transcription;

const SEPARATOR_WIDTH: usize = 40;

pub fn render_transcript(entry: &Transcription) -> String {
    let duration = match entry.duration {
        Some(secs) if secs > 0.0 => format!("{}s", secs.round() as u64),
        _ => "Unknown".to_string(),
    };

    format!(
        "Audio File: {}\nLanguage: {}\nTimestamp: {}\nDuration: {}\n\nTranscription:\n{}",
        entry.file_name,
        entry.language.as_deref().unwrap_or("Unknown"),
        entry.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        duration,
        entry.text
    )
}

/// `transcription-{stem}.txt`, where the stem drops the last extension.
pub fn export_file_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    format!("transcription-{}.txt", stem)
}

pub fn render_bulk(entries: &[Transcription]) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    entries
        .iter()
        .map(|entry| {
            format!(
                "\n{}\n{}\n{}\n",
                separator,
                render_transcript(entry),
                separator
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn bulk_export_file_name(date: NaiveDate) -> String {
    format!("transcriptions-{}.txt", date.format("%Y-%m-%d"))
}

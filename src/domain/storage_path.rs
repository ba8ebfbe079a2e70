use std::fmt;

use super::transcription_id::TranscriptionId;

/// Location of staged audio: `{transcription id}/{file name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn new(id: &TranscriptionId, file_name: &str) -> Self {
        Self(format!("{}/{}", id.as_str(), sanitize_file_name(file_name)))
    }

    /// Wraps a key read back from the store.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn sanitize_file_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match cleaned.trim_start_matches('.') {
        "" => "audio".to_string(),
        name => name.to_string(),
    }
}

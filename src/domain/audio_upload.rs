use bytes::Bytes;

use super::audio_format::AudioFormat;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unsupported audio format: {0}. Please upload an MP3, WAV, or M4A file")]
    UnsupportedFormat(String),
    #[error("file too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },
    #[error("uploaded file is empty")]
    EmptyFile,
}

/// An upload that passed the allow-list and size checks.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub file_name: String,
    pub mime_type: Option<String>,
    pub format: AudioFormat,
    pub data: Bytes,
}

impl AudioUpload {
    /// The MIME type is tried first, then the file extension. Either one
    /// being on the allow-list is enough.
    pub fn validate(
        file_name: &str,
        mime_type: Option<&str>,
        data: Bytes,
        max_bytes: u64,
    ) -> Result<Self, ValidationError> {
        let format = mime_type
            .and_then(AudioFormat::from_mime)
            .or_else(|| AudioFormat::from_file_name(file_name))
            .ok_or_else(|| {
                ValidationError::UnsupportedFormat(
                    mime_type
                        .filter(|m| !m.trim().is_empty())
                        .unwrap_or(file_name)
                        .to_string(),
                )
            })?;

        if data.is_empty() {
            return Err(ValidationError::EmptyFile);
        }

        let size = data.len() as u64;
        if size > max_bytes {
            return Err(ValidationError::FileTooLarge {
                size,
                limit: max_bytes,
            });
        }

        Ok(Self {
            file_name: file_name.to_string(),
            mime_type: mime_type.map(str::to_string),
            format,
            data,
        })
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

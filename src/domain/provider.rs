use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

const MEGABYTE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[serde(rename = "openai")]
    OpenAi,
    Azure,
    Gemini,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Azure => "azure",
            Provider::Gemini => "gemini",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAi => "OpenAI Whisper",
            Provider::Azure => "Azure OpenAI Whisper",
            Provider::Gemini => "Gemini",
        }
    }

    /// Largest upload the provider accepts in one request.
    pub fn max_upload_bytes(&self) -> u64 {
        match self {
            Provider::OpenAi | Provider::Azure => 25 * MEGABYTE,
            Provider::Gemini => 20 * MEGABYTE,
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" | "whisper" => Ok(Provider::OpenAi),
            "azure" => Ok(Provider::Azure),
            "gemini" => Ok(Provider::Gemini),
            other => Err(format!(
                "Invalid provider: {}. Expected: openai, azure, or gemini",
                other
            )),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Thai,
    Japanese,
    Chinese,
    Korean,
    Arabic,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Thai => "Thai",
            Language::Japanese => "Japanese",
            Language::Chinese => "Chinese",
            Language::Korean => "Korean",
            Language::Arabic => "Arabic",
            Language::English => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Order matters: Han ideographs below U+9FB0 are claimed by Japanese first.
static SCRIPT_PATTERNS: LazyLock<Vec<(Language, Regex)>> = LazyLock::new(|| {
    [
        (Language::Thai, r"[\x{0E00}-\x{0E7F}]"),
        (
            Language::Japanese,
            r"[\x{3040}-\x{309F}\x{30A0}-\x{30FF}\x{4E00}-\x{9FAF}]",
        ),
        (Language::Chinese, r"[\x{4E00}-\x{9FFF}]"),
        (Language::Korean, r"[\x{AC00}-\x{D7AF}]"),
        (Language::Arabic, r"[\x{0600}-\x{06FF}]"),
    ]
    .into_iter()
    .filter_map(|(language, pattern)| Regex::new(pattern).ok().map(|re| (language, re)))
    .collect()
});

/// Labels text by the first script pattern with any match. Falls back to English.
pub fn detect_language(text: &str) -> Language {
    SCRIPT_PATTERNS
        .iter()
        .find(|(_, re)| re.is_match(text))
        .map(|(language, _)| *language)
        .unwrap_or(Language::English)
}

/// Maps a provider-reported language (ISO-639-1 code or Whisper's full
/// lowercase name) to a display label.
pub fn language_display_name(code: &str) -> String {
    let normalized = code.trim().to_lowercase();
    let name = match normalized.as_str() {
        "en" | "english" => "English",
        "th" | "thai" => "Thai",
        "zh" | "chinese" => "Chinese",
        "ja" | "japanese" => "Japanese",
        "ko" | "korean" => "Korean",
        "es" | "spanish" => "Spanish",
        "fr" | "french" => "French",
        "de" | "german" => "German",
        "it" | "italian" => "Italian",
        "pt" | "portuguese" => "Portuguese",
        "ru" | "russian" => "Russian",
        "ar" | "arabic" => "Arabic",
        "hi" | "hindi" => "Hindi",
        _ => return code.trim().to_uppercase(),
    };
    name.to_string()
}

const REDACTION_MARKERS: [&str; 5] = ["Bearer ", "api_key=", "key=", "secret=", "token="];

/// Shortens text for log lines, cutting on a char boundary, and redacts
/// anything that looks like a credential.
pub fn log_preview(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let preview = if total > max_chars {
        let cut: String = trimmed.chars().take(max_chars).collect();
        format!("{}... ({} chars total)", cut, total)
    } else {
        trimmed.to_string()
    };

    redact_credentials(&preview)
}

fn redact_credentials(text: &str) -> String {
    let mut result = text.to_string();
    for marker in REDACTION_MARKERS {
        let mut search_from = 0;
        while let Some(found) = result[search_from..].find(marker) {
            let value_start = search_from + found + marker.len();
            let value_end = result[value_start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| value_start + i)
                .unwrap_or(result.len());
            result.replace_range(value_start..value_end, "[REDACTED]");
            search_from = value_start + "[REDACTED]".len();
        }
    }
    result
}

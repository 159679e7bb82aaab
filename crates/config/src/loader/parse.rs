//! Line-oriented `KEY=VALUE` parsing.

/// Parse assignments from env file text.
///
/// Blank lines, `#` comments, and lines without `=` are skipped. The key is
/// everything before the first `=`; key and value are trimmed. Keys keep the
/// case they were written in.
pub fn parse_assignments(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .collect()
}

/// Normalize an event title for identity comparisons: trimmed and case-folded.
pub fn normalize_title(text: &str) -> String {
    text.trim().to_lowercase()
}

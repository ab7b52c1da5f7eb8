//! Counts and previews.

/// Characters kept in the leading and trailing previews.
pub const PREVIEW_CHARS: usize = 50;

const ELLIPSIS: &str = "...";

/// Text counts used in metadata.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCounts {
    /// Unicode scalar values
    pub characters: usize,
    /// Whitespace-separated tokens
    pub words: usize,
    /// Lines (a trailing terminator does not start a new line)
    pub lines: usize,
}

impl TextCounts {
    /// Count the given text.
    pub fn of(text: &str) -> Self {
        Self {
            characters: text.chars().count(),
            words: text.split_whitespace().count(),
            lines: text.lines().count(),
        }
    }
}

/// First `limit` characters, with `...` appended when truncated.
pub fn leading_preview(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Last `limit` characters, with `...` appended when truncated.
pub fn trailing_preview(text: &str, limit: usize) -> String {
    let total = text.chars().count();
    if total <= limit {
        return text.to_string();
    }
    let cut = text
        .char_indices()
        .nth(total - limit)
        .map(|(i, _)| i)
        .unwrap_or(0);
    format!("{}{}", &text[cut..], ELLIPSIS)
}

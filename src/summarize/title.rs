//! Title guessing.

/// Returned when the text has no lines at all.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Lines with more words than this are never treated as titles.
pub const TITLE_MAX_WORDS: usize = 10;

/// Guess a title from the text.
///
/// Returns the first trimmed line of at most `max_words` words that is
/// written entirely in capitals or in title case. Without such a line the
/// first line is returned unchanged.
pub fn guess_title(text: &str, max_words: usize) -> String {
    let text = text.trim();
    if text.is_empty() {
        return UNKNOWN_TITLE.to_string();
    }

    let first = text.split('\n').next().unwrap_or_default();

    text.split('\n')
        .map(str::trim)
        .find(|line| {
            line.split_whitespace().count() <= max_words && (is_upper(line) || is_title(line))
        })
        .unwrap_or(first)
        .to_string()
}

/// At least one cased character and no lowercase ones.
pub fn is_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Every cased run starts with an uppercase character followed only by
/// lowercase ones, and there is at least one cased character.
pub fn is_title(s: &str) -> bool {
    let mut cased = false;
    let mut previous_cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else if c.is_lowercase() {
            if !previous_cased {
                return false;
            }
            previous_cased = true;
            cased = true;
        } else {
            previous_cased = false;
        }
    }
    cased
}

//! Text normalization helpers.

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

static NON_WORD: OnceLock<Regex> = OnceLock::new();

fn non_word() -> &'static Regex {
    NON_WORD.get_or_init(|| Regex::new(r"[^\w\s]").expect("valid non-word pattern"))
}

/// Replace every character that is neither a word character nor whitespace
pub fn strip_non_word(text: &str, replacement: &str) -> String {
    non_word().replace_all(text, replacement).into_owned()
}

/// Lower-case, delete punctuation and split into a set of words
pub fn normalize_words(text: &str) -> HashSet<String> {
    strip_non_word(&text.to_lowercase(), "")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Collapse runs of whitespace (including newlines) into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to `limit` characters, ending in `...` when it was longer
///
/// Counts characters rather than bytes so multi-byte titles never split
/// inside a code point.
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let keep = limit.saturating_sub(3);
    let mut truncated: String = text.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

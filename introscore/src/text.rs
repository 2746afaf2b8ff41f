//! Transcript text helpers
//!
//! Word counting, sentence splitting, and token extraction share exact
//! semantics across every evaluator so that the same transcript always
//! yields the same counts.

/// Whitespace-separated non-empty word count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Sentences: split on `.`, `!`, `?`, trimmed, empties dropped
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Words per minute, rounded; 0 when the duration is not positive
pub fn speech_rate(word_count: usize, duration_seconds: f64) -> u32 {
    if duration_seconds <= 0.0 {
        return 0;
    }
    (word_count as f64 / duration_seconds * 60.0).round() as u32
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Maximal runs of ASCII letters with word boundaries on both sides
///
/// A run adjacent to a digit or underscore is rejected, so "8th" yields
/// no token while "don't" yields "don" and "t". Input must already be
/// lowercased.
pub fn alphabetic_tokens(lower: &str) -> Vec<&str> {
    let bytes = lower.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_lowercase() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_lowercase() {
                i += 1;
            }
            let preceded = start > 0 && is_word_byte(bytes[start - 1]);
            let followed = i < bytes.len() && is_word_byte(bytes[i]);
            if !preceded && !followed {
                tokens.push(&lower[start..i]);
            }
        } else {
            i += 1;
        }
    }
    tokens
}

/// True when `lower` contains `phrase` with non-word characters (or the
/// string edge) on both sides
pub fn contains_phrase(lower: &str, phrase: &str) -> bool {
    let bytes = lower.as_bytes();
    let mut from = 0;
    while let Some(pos) = lower[from..].find(phrase) {
        let start = from + pos;
        let end = start + phrase.len();
        let preceded = start > 0 && is_word_byte(bytes[start - 1]);
        let followed = end < bytes.len() && is_word_byte(bytes[end]);
        if !preceded && !followed {
            return true;
        }
        from = start + 1;
    }
    false
}

/// Strip leading/trailing punctuation from a word, keeping internal
/// apostrophes so "don't" stays distinct from "dont"
pub fn trim_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '\'')
        .trim_matches('\'')
}

//! Field-path tokenization for keyword matching.
//!
//! Keyword rules match whole tokens, not substrings, so `age` never fires
//! on `mortgage` or `average`. Paths split on dots, underscores,
//! camelCase boundaries, and alpha/digit transitions.

use std::collections::BTreeSet;

/// Lowercased tokens of a field path or business name.
pub fn token_set(raw: &str) -> BTreeSet<String> {
    let mut normalized = String::new();
    let mut prev_lower = false;
    let mut prev_alpha = false;
    let mut prev_digit = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            let boundary = (prev_lower && ch.is_ascii_uppercase())
                || (prev_alpha && ch.is_ascii_digit())
                || (prev_digit && ch.is_ascii_alphabetic());
            if boundary {
                normalized.push(' ');
            }
            normalized.push(ch);
            prev_lower = ch.is_ascii_lowercase();
            prev_alpha = ch.is_ascii_alphabetic();
            prev_digit = ch.is_ascii_digit();
        } else {
            normalized.push(' ');
            prev_lower = false;
            prev_alpha = false;
            prev_digit = false;
        }
    }
    normalized
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .filter(|token| !token.chars().all(|ch| ch.is_ascii_digit()))
        .collect()
}

/// True when any of `keywords` appears as a whole token.
pub fn contains_any(tokens: &BTreeSet<String>, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| tokens.contains(*k))
}

/// True when every word of the phrase appears as a token, e.g.
/// `net worth` against `client.netWorth`.
pub fn contains_phrase(tokens: &BTreeSet<String>, phrase: &[&str]) -> bool {
    phrase.iter().all(|k| tokens.contains(*k))
}

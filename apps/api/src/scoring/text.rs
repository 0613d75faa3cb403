//! Text normalization and tokenization for skill matching.

use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z0-9+.#-]+").expect("Invalid token regex"));

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("Invalid word regex"));

/// Unigrams and adjacent-pair bigrams, in text order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    pub unigrams: Vec<String>,
    pub bigrams: Vec<String>,
}

/// Lowercases, maps everything outside `[a-z0-9+#./-]` to a space, collapses
/// whitespace and trims. Keeps `c++`, `c#`, `node.js`, `ci/cd` intact.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .to_lowercase()
        .chars()
        .map(|c| if is_skill_char(c) { c } else { ' ' })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_skill_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '#' | '.' | '/' | '-')
}

/// Splits text into unigrams (`[a-z0-9+.#-]+` runs of the lowercased text) and
/// bigrams (`"a b"` for each adjacent pair).
pub fn tokenize(text: &str) -> Tokens {
    let lowered = text.to_lowercase();
    let unigrams: Vec<String> = TOKEN_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect();
    let bigrams = unigrams
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect();
    Tokens { unigrams, bigrams }
}

/// Drops every non-alphanumeric character: `"node.js"` → `"nodejs"`, `"ci cd"` → `"cicd"`.
pub fn strip_punctuation(s: &str) -> String {
    s.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Number of `\w+` runs in the text.
pub fn word_count(text: &str) -> usize {
    WORD_RE.find_iter(text).count()
}

/// Truncates to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

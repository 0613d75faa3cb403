//! Skill matcher: decides whether a canonical skill (or any of its aliases)
//! appears in a resume's token set.
//!
//! Layered strategy, first satisfied rule wins:
//! 1. exact: candidate equals a unigram/bigram, raw or with punctuation stripped
//! 2. substring: stripped candidate is contained in a stripped unigram/bigram
//! 3. fuzzy: normalized Levenshtein similarity ≥ threshold, for candidates of
//!    at least `fuzzy_min_length` alphanumeric chars

use std::collections::HashSet;

use serde::Serialize;
use strsim::normalized_levenshtein;

use crate::scoring::aliases::AliasTable;
use crate::scoring::params::MatchParams;
use crate::scoring::text::{normalize, strip_punctuation, tokenize, truncate_chars, Tokens};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Substring,
    Fuzzy,
}

/// Pre-computed lookup structures for one resume.
#[derive(Debug, Clone, Default)]
pub struct ResumeTokens {
    exact: HashSet<String>,
    stripped: HashSet<String>,
}

impl ResumeTokens {
    pub fn from_tokens(tokens: &Tokens) -> Self {
        let exact: HashSet<String> = tokens
            .unigrams
            .iter()
            .chain(tokens.bigrams.iter())
            .cloned()
            .collect();
        let stripped = exact
            .iter()
            .map(|t| strip_punctuation(t))
            .filter(|t| !t.is_empty())
            .collect();
        Self { exact, stripped }
    }

    /// Normalizes and tokenizes raw text, matching only its first `max_chars` characters.
    pub fn from_text(text: &str, max_chars: usize) -> Self {
        let normalized = normalize(truncate_chars(text, max_chars));
        Self::from_tokens(&tokenize(&normalized))
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }
}

pub struct SkillMatcher<'a> {
    aliases: &'a AliasTable,
    params: &'a MatchParams,
}

impl<'a> SkillMatcher<'a> {
    pub fn new(aliases: &'a AliasTable, params: &'a MatchParams) -> Self {
        Self { aliases, params }
    }

    pub fn matches(&self, tokens: &ResumeTokens, skill: &str) -> bool {
        self.match_kind(tokens, skill).is_some()
    }

    /// Which rule matched the skill, or `None` if no candidate is present.
    pub fn match_kind(&self, tokens: &ResumeTokens, skill: &str) -> Option<MatchKind> {
        if tokens.is_empty() {
            return None;
        }
        let candidates: Vec<(String, String)> = self
            .aliases
            .candidates(skill)
            .into_iter()
            .map(|c| {
                let stripped = strip_punctuation(&c);
                (c, stripped)
            })
            .collect();

        if candidates
            .iter()
            .any(|(raw, stripped)| is_exact(tokens, raw, stripped))
        {
            return Some(MatchKind::Exact);
        }
        if candidates
            .iter()
            .any(|(_, stripped)| self.is_substring(tokens, stripped))
        {
            return Some(MatchKind::Substring);
        }
        if candidates
            .iter()
            .any(|(_, stripped)| self.is_fuzzy(tokens, stripped))
        {
            return Some(MatchKind::Fuzzy);
        }
        None
    }

    fn is_substring(&self, tokens: &ResumeTokens, candidate: &str) -> bool {
        let len = candidate.chars().count();
        if len == 0 || len < self.params.substring_min_length {
            return false;
        }
        tokens.stripped.iter().any(|t| t.contains(candidate))
    }

    fn is_fuzzy(&self, tokens: &ResumeTokens, candidate: &str) -> bool {
        let len = candidate.chars().count();
        if len == 0 || len < self.params.fuzzy_min_length {
            return false;
        }
        let threshold = self.params.fuzzy_similarity_threshold;
        tokens.stripped.iter().any(|t| {
            // edit distance is at least the length difference
            let token_len = t.chars().count();
            let longest = len.max(token_len) as f64;
            let best_case = 1.0 - (len.abs_diff(token_len) as f64 / longest);
            best_case >= threshold && normalized_levenshtein(candidate, t) >= threshold
        })
    }
}

fn is_exact(tokens: &ResumeTokens, raw: &str, stripped: &str) -> bool {
    tokens.exact.contains(raw) || (!stripped.is_empty() && tokens.stripped.contains(stripped))
}

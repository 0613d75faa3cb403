//! Empirical scoring constants.
//!
//! Every threshold, weight, and deduction the engine uses lives here so it can be
//! overridden from config without touching the algorithms. `Default` reproduces
//! the reference scoring behaviour exactly.

use serde::{Deserialize, Serialize};

/// Skill matcher tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchParams {
    /// Minimum normalized edit similarity (0.0 – 1.0) for a fuzzy match.
    pub fuzzy_similarity_threshold: f64,
    /// Fuzzy matching is skipped for candidates shorter than this (alphanumeric chars).
    pub fuzzy_min_length: usize,
    /// Substring matching is skipped for candidates shorter than this.
    pub substring_min_length: usize,
    /// Only the first N characters of a resume are fed to the matcher.
    pub max_match_chars: usize,
}

impl Default for MatchParams {
    fn default() -> Self {
        Self {
            fuzzy_similarity_threshold: 0.92,
            fuzzy_min_length: 4,
            substring_min_length: 1,
            max_match_chars: 100_000,
        }
    }
}

/// Composite weights: ats = keyword*w1 + section*w2 + format*w3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeights {
    pub keyword: f64,
    pub section: f64,
    pub format: f64,
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            keyword: 0.5,
            section: 0.25,
            format: 0.25,
        }
    }
}

/// Format sub-score deductions. Deductions are cumulative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatRules {
    pub min_words: usize,
    pub too_short_penalty: i32,
    pub max_words: usize,
    pub too_long_penalty: i32,
    pub no_bullets_penalty: i32,
    /// Applied to blank text, or to an upload whose extracted text is under
    /// `min_extracted_chars` characters.
    pub extraction_failure_penalty: i32,
    pub min_extracted_chars: usize,
}

impl Default for FormatRules {
    fn default() -> Self {
        Self {
            min_words: 250,
            too_short_penalty: 20,
            max_words: 3000,
            too_long_penalty: 15,
            no_bullets_penalty: 10,
            extraction_failure_penalty: 40,
            min_extracted_chars: 50,
        }
    }
}

/// Thresholds that trigger suggestions. A score strictly below the threshold fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionThresholds {
    pub keyword: u32,
    pub section: u32,
    pub format: u32,
    pub jd_overlap: u32,
    /// Maximum number of missing skills named in the missing-skills suggestion.
    pub max_listed_missing: usize,
}

impl Default for SuggestionThresholds {
    fn default() -> Self {
        Self {
            keyword: 70,
            section: 70,
            format: 80,
            jd_overlap: 50,
            max_listed_missing: 8,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    pub matching: MatchParams,
    pub weights: CompositeWeights,
    pub format: FormatRules,
    pub suggestions: SuggestionThresholds,
}

/// Rounds half-to-even and clamps into the percentage range.
pub fn round_percent(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.round_ties_even().clamp(0.0, 100.0) as u32
}

/// `round(100 * numerator / max(1, denominator))`, clamped to [0, 100].
pub fn ratio_percent(numerator: usize, denominator: usize) -> u32 {
    round_percent(100.0 * numerator as f64 / denominator.max(1) as f64)
}

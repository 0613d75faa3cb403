//! Independent sub-scorers: keyword match, section coverage, format, and
//! job-description overlap.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::scoring::matcher::{ResumeTokens, SkillMatcher};
use crate::scoring::params::{ratio_percent, FormatRules};
use crate::scoring::text::word_count;

/// Section headings looked for as whole words anywhere in the resume.
pub const SECTION_NAMES: [&str; 9] = [
    "summary",
    "objective",
    "skills",
    "experience",
    "employment",
    "education",
    "projects",
    "certifications",
    "contact",
];

static SECTION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SECTION_NAMES
        .iter()
        .map(|name| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(name)))
                .expect("Invalid section regex");
            (*name, re)
        })
        .collect()
});

static JD_TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-z][a-z0-9+.#-]+").expect("Invalid JD term regex"));

const STOP_WORDS: &[&str] = &[
    "and", "or", "the", "a", "an", "to", "for", "with", "of", "in", "on", "by", "at", "from",
    "as", "is", "are", "be", "this", "that", "these", "those", "you", "we", "they", "it", "your",
    "our",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordOutcome {
    pub score: u32,
    /// Skills found, in taxonomy order.
    pub present: Vec<String>,
    /// Skills not found, in taxonomy order.
    pub missing: Vec<String>,
}

/// `round(100 * |present| / max(1, |skills|))`. Empty skill list → 0.
pub fn keyword_match(
    matcher: &SkillMatcher<'_>,
    tokens: &ResumeTokens,
    skills: &[String],
) -> KeywordOutcome {
    let (present, missing): (Vec<String>, Vec<String>) = skills
        .iter()
        .cloned()
        .partition(|skill| matcher.matches(tokens, skill));
    KeywordOutcome {
        score: ratio_percent(present.len(), skills.len()),
        present,
        missing,
    }
}

/// Section names present as whole words (case-insensitive), in declaration order.
pub fn detect_sections(text: &str) -> Vec<&'static str> {
    SECTION_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(name, _)| *name)
        .collect()
}

pub fn section_score(text: &str) -> u32 {
    ratio_percent(detect_sections(text).len(), SECTION_NAMES.len())
}

/// Starts at 100 and applies every matching deduction, clamped to [0, 100].
///
/// `raw_len` is the byte length of the original upload (0 for pasted text); a
/// non-empty upload that extracts to fewer than `min_extracted_chars` chars is
/// treated as an extraction failure.
pub fn format_score(text: &str, raw_len: usize, rules: &FormatRules) -> u32 {
    let mut score: i32 = 100;
    let words = word_count(text);
    if words < rules.min_words {
        score -= rules.too_short_penalty;
    }
    if words > rules.max_words {
        score -= rules.too_long_penalty;
    }
    if !text.contains('•') && !text.contains('-') {
        score -= rules.no_bullets_penalty;
    }
    let extraction_failed =
        text.trim().is_empty() || (raw_len > 0 && text.chars().count() < rules.min_extracted_chars);
    if extraction_failed {
        score -= rules.extraction_failure_penalty;
    }
    score.clamp(0, 100) as u32
}

/// Alphabetic-leading terms longer than two chars, minus stop words.
pub fn jd_terms(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    JD_TERM_RE
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|t| t.len() > 2 && !STOP_WORDS.contains(t))
        .map(str::to_string)
        .collect()
}

/// Share of job-description terms that also appear in the resume.
/// `None` when the job description yields no terms.
pub fn jd_overlap_score(job_description: &str, resume_text: &str) -> Option<u32> {
    let jd = jd_terms(job_description);
    if jd.is_empty() {
        return None;
    }
    let resume = jd_terms(resume_text);
    let overlap = jd.intersection(&resume).count();
    Some(ratio_percent(overlap, jd.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::aliases::AliasTable;
    use crate::scoring::params::MatchParams;

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_keyword_match_preserves_taxonomy_order() {
        let aliases = AliasTable::default();
        let params = MatchParams::default();
        let matcher = SkillMatcher::new(&aliases, &params);
        let tokens = ResumeTokens::from_text("sql and react", params.max_match_chars);
        let outcome = keyword_match(
            &matcher,
            &tokens,
            &skills(&["docker", "react", "kubernetes", "sql"]),
        );
        assert_eq!(outcome.present, vec!["react", "sql"]);
        assert_eq!(outcome.missing, vec!["docker", "kubernetes"]);
        assert_eq!(outcome.score, 50);
    }

    #[test]
    fn test_keyword_match_empty_skill_list_scores_zero() {
        let aliases = AliasTable::default();
        let params = MatchParams::default();
        let matcher = SkillMatcher::new(&aliases, &params);
        let tokens = ResumeTokens::from_text("anything", params.max_match_chars);
        let outcome = keyword_match(&matcher, &tokens, &[]);
        assert_eq!(outcome.score, 0);
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_sections_require_whole_words() {
        assert_eq!(detect_sections("SKILLS\nExperience"), vec!["skills", "experience"]);
        // "skillset" and "contacts" are not whole-word hits
        assert!(detect_sections("skillset contacts").is_empty());
    }

    #[test]
    fn test_section_score_rounds() {
        assert_eq!(section_score(""), 0);
        assert_eq!(section_score("Summary"), 11);
        let all = SECTION_NAMES.join(" ");
        assert_eq!(section_score(&all), 100);
    }

    #[test]
    fn test_format_deductions_are_cumulative() {
        let rules = FormatRules::default();
        // short (−20), no bullets (−10)
        assert_eq!(format_score("javascript, react, sql", 0, &rules), 70);
        // short (−20), no bullets (−10), blank (−40)
        assert_eq!(format_score("   ", 0, &rules), 30);
    }

    #[test]
    fn test_format_floor_on_failed_extraction() {
        let rules = FormatRules::default();
        let score = format_score("- tiny text", 48_000, &rules);
        assert!(score <= 60, "score was {score}");
        assert_eq!(score, 40);
    }

    #[test]
    fn test_format_long_resume_penalty() {
        let rules = FormatRules::default();
        let text = "- word ".repeat(3001);
        assert_eq!(format_score(&text, 0, &rules), 85);
    }

    #[test]
    fn test_format_bullet_glyph_counts() {
        let rules = FormatRules::default();
        let text = format!("• {}", "word ".repeat(300));
        assert_eq!(format_score(&text, 0, &rules), 100);
    }

    #[test]
    fn test_jd_terms_filter_stop_words_and_short_tokens() {
        let terms = jd_terms("We are hiring a Rust engineer for the C++ and Go team");
        assert!(terms.contains("rust"));
        assert!(terms.contains("c++"));
        assert!(!terms.contains("the"));
        assert!(!terms.contains("go"));
        assert!(!terms.contains("we"));
    }

    #[test]
    fn test_jd_overlap_undefined_for_stop_words_only() {
        assert_eq!(jd_overlap_score("", "resume"), None);
        assert_eq!(jd_overlap_score("and the with your", "resume"), None);
    }

    #[test]
    fn test_jd_overlap_ratio() {
        // jd terms: rust, kafka, kubernetes, postgres → 2 of 4 present
        let score = jd_overlap_score("Rust, Kafka, Kubernetes, Postgres", "I write Rust on Kubernetes");
        assert_eq!(score, Some(50));
    }
}

// Resume scoring engine.
// Normalize → tokenize → match skills → sub-scores → composite + suggestions.
// Pure and CPU-bound: no I/O, no shared mutable state.

pub mod aliases;
pub mod contact;
pub mod matcher;
pub mod params;
pub mod subscores;
pub mod suggestions;
pub mod text;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::aliases::AliasTable;
use crate::scoring::contact::{detect_contact, ContactInfo};
use crate::scoring::matcher::{ResumeTokens, SkillMatcher};
use crate::scoring::params::{round_percent, ScoringParams};
use crate::scoring::subscores::{format_score, jd_overlap_score, keyword_match, section_score};
use crate::scoring::suggestions::{build_suggestions, SuggestionInputs};
use crate::scoring::text::word_count;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub word_count: usize,
    pub reading_time_minutes: u32,
}

/// Full analysis returned to callers and stored in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub ats_score: u32,
    pub keyword_match: KeywordMatch,
    pub missing_skills: Vec<String>,
    pub format_score: u32,
    pub section_score: u32,
    pub suggestions: Vec<String>,
    /// `None` when no job description was supplied or it yielded no terms.
    pub jd_match_score: Option<u32>,
    pub contact: ContactInfo,
    pub metrics: Metrics,
}

/// Input for one scoring call.
#[derive(Debug, Clone, Copy)]
pub struct ResumeInput<'a> {
    /// Extracted or pasted resume text.
    pub text: &'a str,
    /// Byte length of the original upload; 0 for pasted text.
    pub raw_len: usize,
    /// Role skill list from the taxonomy, in taxonomy order.
    pub skills: &'a [String],
    /// Job description, already trimmed; blank means "not supplied".
    pub job_description: Option<&'a str>,
}

impl<'a> ResumeInput<'a> {
    pub fn text(text: &'a str, skills: &'a [String]) -> Self {
        Self {
            text,
            raw_len: 0,
            skills,
            job_description: None,
        }
    }

    pub fn with_job_description(mut self, job_description: Option<&'a str>) -> Self {
        self.job_description = job_description.map(str::trim).filter(|jd| !jd.is_empty());
        self
    }

    pub fn with_raw_len(mut self, raw_len: usize) -> Self {
        self.raw_len = raw_len;
        self
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// Holds the read-only alias table and tuning constants. Shared across
/// requests behind an `Arc`; every call allocates only local data.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    aliases: AliasTable,
    params: ScoringParams,
}

impl ScoringEngine {
    pub fn new(aliases: AliasTable, params: ScoringParams) -> Self {
        Self { aliases, params }
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn score(&self, input: &ResumeInput<'_>) -> AnalysisResult {
        let params = &self.params;
        let text = input.text;

        let matcher = SkillMatcher::new(&self.aliases, &params.matching);
        let tokens = ResumeTokens::from_text(text, params.matching.max_match_chars);
        let keywords = keyword_match(&matcher, &tokens, input.skills);

        let sections = section_score(text);
        let format = format_score(text, input.raw_len, &params.format);
        let ats_score = round_percent(
            params.weights.keyword * keywords.score as f64
                + params.weights.section * sections as f64
                + params.weights.format * format as f64,
        );

        let jd_match_score = input
            .job_description
            .and_then(|jd| jd_overlap_score(jd, text));
        let contact = detect_contact(text);

        let suggestions = build_suggestions(
            &SuggestionInputs {
                missing_skills: &keywords.missing,
                keyword_score: keywords.score,
                section_score: sections,
                format_score: format,
                has_job_description: input.job_description.is_some(),
                jd_match_score,
                contact,
            },
            &params.suggestions,
        );

        let words = word_count(text);
        let metrics = Metrics {
            word_count: words,
            reading_time_minutes: reading_time_minutes(words),
        };

        debug!(
            "Scored resume: ats={ats_score} keyword={} section={sections} format={format} matched={}/{}",
            keywords.score,
            keywords.present.len(),
            input.skills.len()
        );

        AnalysisResult {
            ats_score,
            keyword_match: KeywordMatch {
                score: keywords.score,
            },
            missing_skills: keywords.missing,
            format_score: format,
            section_score: sections,
            suggestions,
            jd_match_score,
            contact,
            metrics,
        }
    }
}

/// `max(1, round(words / 200))`, rounding half-to-even.
pub fn reading_time_minutes(words: usize) -> u32 {
    let minutes = (words as f64 / 200.0).round_ties_even() as u32;
    minutes.max(1)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::suggestions::{
        missing_skills_message, ADD_EMAIL, ADD_KEYWORDS, ADD_PHONE, ADD_PROFILE_LINK,
        IMPROVE_FORMAT, LABEL_SECTIONS, MIRROR_JD, TAILOR_TO_JD,
    };

    fn engine() -> ScoringEngine {
        let aliases = AliasTable::from_json(include_str!("../../data/aliases.json")).unwrap();
        ScoringEngine::new(aliases, ScoringParams::default())
    }

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    const STRONG_RESUME: &str = r#"
        Jane Doe | jane@example.com | +1 555 010 2030 | github.com/jane
        SUMMARY
        Backend engineer building Rust and Python services.
        SKILLS
        - Python, Docker, Kubernetes, PostgreSQL
        EXPERIENCE
        - Cut p99 latency by 40% on a payments API
        EDUCATION
        B.Sc. Computer Science
        PROJECTS
        - Open-source contributor
    "#;

    #[test]
    fn test_end_to_end_reference_scenario() {
        let role = skills(&["javascript", "react", "sql", "docker"]);
        let result = engine().score(&ResumeInput::text("javascript, react, sql", &role));

        assert_eq!(result.keyword_match.score, 75);
        assert_eq!(result.missing_skills, vec!["docker"]);
        assert_eq!(result.section_score, 0);
        assert_eq!(result.format_score, 70);
        // round(0.5*75 + 0.25*0 + 0.25*70) = 55
        assert_eq!(result.ats_score, 55);
        assert_eq!(result.jd_match_score, None);
        assert_eq!(
            result.suggestions,
            vec![
                missing_skills_message(&["docker".to_string()], 8),
                LABEL_SECTIONS.to_string(),
                IMPROVE_FORMAT.to_string(),
                ADD_EMAIL.to_string(),
                ADD_PHONE.to_string(),
                ADD_PROFILE_LINK.to_string(),
            ]
        );
        assert_eq!(result.metrics.word_count, 3);
        assert_eq!(result.metrics.reading_time_minutes, 1);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let role = skills(&["python", "docker", "kubernetes", "sql", "graphql"]);
        let input = ResumeInput::text(STRONG_RESUME, &role)
            .with_job_description(Some("Python backend engineer with Kafka"));
        let e = engine();
        assert_eq!(e.score(&input), e.score(&input));
    }

    #[test]
    fn test_empty_skill_list() {
        let result = engine().score(&ResumeInput::text(STRONG_RESUME, &[]));
        assert_eq!(result.keyword_match.score, 0);
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.suggestions.first().map(String::as_str), Some(ADD_KEYWORDS));
    }

    #[test]
    fn test_strong_resume_contact_and_sections() {
        let role = skills(&["python", "docker", "kubernetes", "sql"]);
        let result = engine().score(&ResumeInput::text(STRONG_RESUME, &role));
        // sql via the postgresql alias
        assert_eq!(result.keyword_match.score, 100);
        assert!(result.contact.has_email && result.contact.has_phone && result.contact.has_github);
        assert_eq!(result.section_score, 56); // 5 of 9
        assert!(!result.suggestions.iter().any(|s| s == ADD_EMAIL));
    }

    #[test]
    fn test_failed_extraction_is_penalized_not_rejected() {
        let role = skills(&["python"]);
        let result = engine().score(&ResumeInput::text("", &role).with_raw_len(120_000));
        assert!(result.format_score <= 60);
        assert_eq!(result.metrics.word_count, 0);
        assert_eq!(result.metrics.reading_time_minutes, 1);
        assert!(result.suggestions.iter().any(|s| s == IMPROVE_FORMAT));
    }

    #[test]
    fn test_job_description_overlap_and_mirror_rule() {
        let role = skills(&["python"]);
        let input = ResumeInput::text(STRONG_RESUME, &role)
            .with_job_description(Some("Scala Spark Airflow Snowflake engineer"));
        let result = engine().score(&input);
        // only "engineer" overlaps: 1 of 5
        assert_eq!(result.jd_match_score, Some(20));
        assert!(result.suggestions.iter().any(|s| s == TAILOR_TO_JD));
        assert_eq!(result.suggestions.last().map(String::as_str), Some(MIRROR_JD));
    }

    #[test]
    fn test_stop_word_job_description_has_no_overlap_score() {
        let role = skills(&["python"]);
        let input =
            ResumeInput::text(STRONG_RESUME, &role).with_job_description(Some("the and of your"));
        let result = engine().score(&input);
        assert_eq!(result.jd_match_score, None);
        assert!(!result.suggestions.iter().any(|s| s == MIRROR_JD));
        assert!(result.suggestions.iter().any(|s| s == TAILOR_TO_JD));
    }

    #[test]
    fn test_blank_job_description_counts_as_absent() {
        let input = ResumeInput::text("x", &[]).with_job_description(Some("   "));
        assert!(input.job_description.is_none());
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        let e = engine();
        let role = skills(&["python", "go", "c++"]);
        let long = "python ".repeat(5000);
        let jds = [
            None,
            Some("Senior python developer with kubernetes"),
            Some("the and of"),
            Some(STRONG_RESUME),
            Some(long.as_str()),
        ];
        for text in ["", "•", STRONG_RESUME, long.as_str()] {
            for jd in jds {
                let r = e.score(
                    &ResumeInput::text(text, &role)
                        .with_raw_len(10)
                        .with_job_description(jd),
                );
                for v in [r.ats_score, r.keyword_match.score, r.format_score, r.section_score] {
                    assert!(v <= 100, "{v} out of range for {text:?}");
                }
                if let Some(jd_score) = r.jd_match_score {
                    assert!(jd_score <= 100, "jd {jd_score} out of range for {text:?}");
                }
            }
        }
    }

    #[test]
    fn test_reading_time() {
        assert_eq!(reading_time_minutes(0), 1);
        assert_eq!(reading_time_minutes(300), 2);
        // 500/200 = 2.5 → 2 (half-to-even)
        assert_eq!(reading_time_minutes(500), 2);
        assert_eq!(reading_time_minutes(700), 4);
    }
}

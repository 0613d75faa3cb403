//! Rule-based suggestion generator.
//!
//! Rules run in a fixed order and each appends at most one message. Order and
//! thresholds are part of the scoring contract; do not reorder.

use crate::scoring::contact::ContactInfo;
use crate::scoring::params::SuggestionThresholds;

pub const ADD_KEYWORDS: &str =
    "Add more role-specific keywords across Skills and Experience sections.";
pub const LABEL_SECTIONS: &str =
    "Ensure key sections like Summary, Skills, Experience, and Education are present and clearly labeled.";
pub const IMPROVE_FORMAT: &str =
    "Use bullet points and ensure the document text is selectable (avoid image-only PDFs).";
pub const TAILOR_TO_JD: &str = "Tailor quantified achievements to the provided job description.";
pub const ADD_EMAIL: &str = "Add a professional email address in the header.";
pub const ADD_PHONE: &str = "Include a reachable phone number.";
pub const ADD_PROFILE_LINK: &str = "Add a LinkedIn or GitHub link if relevant.";
pub const MIRROR_JD: &str = "Mirror the language of the job description where appropriate.";

/// Everything the rules look at.
#[derive(Debug, Clone)]
pub struct SuggestionInputs<'a> {
    pub missing_skills: &'a [String],
    pub keyword_score: u32,
    pub section_score: u32,
    pub format_score: u32,
    pub has_job_description: bool,
    pub jd_match_score: Option<u32>,
    pub contact: ContactInfo,
}

#[derive(Debug, Default)]
struct Suggestions(Vec<String>);

impl Suggestions {
    fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.0.contains(&message) {
            self.0.push(message);
        }
    }
}

pub fn missing_skills_message(missing: &[String], max_listed: usize) -> String {
    let listed: Vec<&str> = missing.iter().take(max_listed).map(String::as_str).collect();
    format!("Include relevant skills if applicable: {}.", listed.join(", "))
}

pub fn build_suggestions(
    inputs: &SuggestionInputs<'_>,
    thresholds: &SuggestionThresholds,
) -> Vec<String> {
    let mut out = Suggestions::default();

    if !inputs.missing_skills.is_empty() {
        out.push(missing_skills_message(
            inputs.missing_skills,
            thresholds.max_listed_missing,
        ));
    }
    if inputs.keyword_score < thresholds.keyword {
        out.push(ADD_KEYWORDS);
    }
    if inputs.section_score < thresholds.section {
        out.push(LABEL_SECTIONS);
    }
    if inputs.format_score < thresholds.format {
        out.push(IMPROVE_FORMAT);
    }
    if inputs.has_job_description {
        out.push(TAILOR_TO_JD);
    }
    if !inputs.contact.has_email {
        out.push(ADD_EMAIL);
    }
    if !inputs.contact.has_phone {
        out.push(ADD_PHONE);
    }
    if !inputs.contact.has_profile_link() {
        out.push(ADD_PROFILE_LINK);
    }
    if inputs.has_job_description {
        if let Some(jd) = inputs.jd_match_score {
            if jd < thresholds.jd_overlap {
                out.push(MIRROR_JD);
            }
        }
    }

    out.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_contact() -> ContactInfo {
        ContactInfo {
            has_email: true,
            has_phone: true,
            has_linkedin: true,
            has_github: false,
        }
    }

    fn inputs(missing: &[String]) -> SuggestionInputs<'_> {
        SuggestionInputs {
            missing_skills: missing,
            keyword_score: 100,
            section_score: 100,
            format_score: 100,
            has_job_description: false,
            jd_match_score: None,
            contact: complete_contact(),
        }
    }

    #[test]
    fn test_strong_resume_gets_no_suggestions() {
        let got = build_suggestions(&inputs(&[]), &SuggestionThresholds::default());
        assert!(got.is_empty(), "{got:?}");
    }

    #[test]
    fn test_missing_skills_listing_caps_at_eight() {
        let missing: Vec<String> = (1..=10).map(|i| format!("skill{i}")).collect();
        let got = build_suggestions(&inputs(&missing), &SuggestionThresholds::default());
        assert_eq!(
            got[0],
            "Include relevant skills if applicable: skill1, skill2, skill3, skill4, skill5, skill6, skill7, skill8."
        );
        assert!(!got[0].contains("skill9"));
    }

    #[test]
    fn test_rule_order_is_fixed() {
        let missing = vec!["docker".to_string()];
        let mut i = inputs(&missing);
        i.keyword_score = 10;
        i.section_score = 10;
        i.format_score = 10;
        i.has_job_description = true;
        i.jd_match_score = Some(20);
        i.contact = ContactInfo::default();

        let got = build_suggestions(&i, &SuggestionThresholds::default());
        assert_eq!(
            got,
            vec![
                missing_skills_message(&missing, 8),
                ADD_KEYWORDS.to_string(),
                LABEL_SECTIONS.to_string(),
                IMPROVE_FORMAT.to_string(),
                TAILOR_TO_JD.to_string(),
                ADD_EMAIL.to_string(),
                ADD_PHONE.to_string(),
                ADD_PROFILE_LINK.to_string(),
                MIRROR_JD.to_string(),
            ]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut i = inputs(&[]);
        i.keyword_score = 70;
        i.section_score = 70;
        i.format_score = 80;
        assert!(build_suggestions(&i, &SuggestionThresholds::default()).is_empty());
    }

    #[test]
    fn test_no_mirror_when_overlap_undefined() {
        let mut i = inputs(&[]);
        i.has_job_description = true;
        i.jd_match_score = None;
        let got = build_suggestions(&i, &SuggestionThresholds::default());
        assert_eq!(got, vec![TAILOR_TO_JD.to_string()]);
    }

    #[test]
    fn test_github_alone_satisfies_profile_rule() {
        let mut i = inputs(&[]);
        i.contact.has_linkedin = false;
        i.contact.has_github = true;
        assert!(build_suggestions(&i, &SuggestionThresholds::default()).is_empty());
    }
}

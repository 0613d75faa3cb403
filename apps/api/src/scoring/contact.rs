//! Pattern-based contact-info presence checks over raw resume text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.+'-]+@[\w.-]+\.[A-Za-z]{2,}").expect("Invalid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\+?\d[\s-]?){7,}\d").expect("Invalid phone regex"));

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub has_email: bool,
    pub has_phone: bool,
    pub has_linkedin: bool,
    pub has_github: bool,
}

impl ContactInfo {
    pub fn has_profile_link(&self) -> bool {
        self.has_linkedin || self.has_github
    }
}

pub fn detect_contact(text: &str) -> ContactInfo {
    let lowered = text.to_lowercase();
    ContactInfo {
        has_email: looks_like_email(text),
        has_phone: PHONE_RE.is_match(text),
        has_linkedin: lowered.contains("linkedin.com"),
        has_github: lowered.contains("github.com"),
    }
}

/// True when the text contains something shaped like `local@domain.tld`.
pub fn looks_like_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_all_signals() {
        let info = detect_contact(
            "jane.doe+jobs@example.co | +1 555-123-4567 | LinkedIn.com/in/jane | github.com/jane",
        );
        assert_eq!(
            info,
            ContactInfo {
                has_email: true,
                has_phone: true,
                has_linkedin: true,
                has_github: true,
            }
        );
    }

    #[test]
    fn test_absent_signals_are_false() {
        let info = detect_contact("javascript, react, sql");
        assert_eq!(info, ContactInfo::default());
        assert!(!info.has_profile_link());
    }

    #[test]
    fn test_phone_needs_eight_digits() {
        assert!(detect_contact("call 5551234567").has_phone);
        assert!(detect_contact("555 123 45").has_phone);
        assert!(!detect_contact("class of 2019").has_phone);
    }

    #[test]
    fn test_email_requires_tld() {
        assert!(!looks_like_email("user@localhost"));
        assert!(looks_like_email("o'brien@mail.ie"));
    }
}

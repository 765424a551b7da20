//! Record cleaning — email validation, name and phone normalization.
//!
//! These helpers never fail: malformed input degrades to pass-through or
//! an empty result, and the caller decides whether to drop the record.

use std::sync::OnceLock;

use regex::Regex;

/// Organizational suffix appended to every non-empty normalized name.
pub const NAME_SUFFIX: &str = "TKT ONLINE CAMPUS";

fn email_re() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .expect("valid email regex")
    })
}

fn honorific_re() -> &'static Regex {
    static HONORIFIC_RE: OnceLock<Regex> = OnceLock::new();
    HONORIFIC_RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:Dr\.?|Mr\.?|Mrs\.?|Ms\.?|Prof\.?|Rev\.?)\s+")
            .expect("valid honorific regex")
    })
}

/// Syntactic email check. Trims surrounding whitespace first; no DNS or
/// deliverability lookup.
pub fn is_valid_email(raw: &str) -> bool {
    let email = raw.trim();
    if email.len() < 3 {
        return false;
    }
    email_re().is_match(email)
}

/// Normalize a display name:
/// strip one leading honorific, drop single-letter tokens (bare initials,
/// with or without a period), rejoin, and append [`NAME_SUFFIX`].
///
/// A name that consists entirely of honorifics and initials collapses to
/// the empty string — no suffix is appended in that case.
pub fn clean_name(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let without_title = honorific_re().replace(raw, "");

    let kept: Vec<&str> = without_title
        .split_whitespace()
        .filter(|token| token.replace('.', "").chars().count() > 1)
        .collect();

    let cleaned = kept.join(" ");
    if cleaned.is_empty() {
        cleaned
    } else {
        format!("{cleaned} {NAME_SUFFIX}")
    }
}

/// Reduce a phone value to decimal digits only. Idempotent; empty input
/// passes through.
pub fn clean_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_valid_email() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last+tag@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("x@"));
        assert!(!is_valid_email("@y.com"));
        assert!(!is_valid_email("a b@c.com"));
    }

    #[test]
    fn trims_before_validating() {
        assert!(is_valid_email("  jo@ex.com  "));
    }

    #[test]
    fn single_letter_tld_is_invalid() {
        assert!(!is_valid_email("a@b.c"));
    }

    #[test]
    fn strips_title_and_initial_then_appends_suffix() {
        assert_eq!(clean_name("Dr. John K. Smith"), "John Smith TKT ONLINE CAMPUS");
    }

    #[test]
    fn title_match_is_case_insensitive() {
        assert_eq!(clean_name("mrs Jane Doe"), "Jane Doe TKT ONLINE CAMPUS");
        assert_eq!(clean_name("PROF. Ada Lovelace"), "Ada Lovelace TKT ONLINE CAMPUS");
    }

    #[test]
    fn only_the_leading_title_is_removed() {
        // "Dr" mid-name is an ordinary token, not an honorific.
        assert_eq!(clean_name("John Dr Smith"), "John Dr Smith TKT ONLINE CAMPUS");
    }

    #[test]
    fn all_initials_collapse_to_empty_without_suffix() {
        assert_eq!(clean_name("A B"), "");
        assert_eq!(clean_name("J. K."), "");
    }

    #[test]
    fn empty_name_passes_through() {
        assert_eq!(clean_name(""), "");
    }

    #[test]
    fn initials_without_periods_are_dropped() {
        assert_eq!(clean_name("J Smith"), "Smith TKT ONLINE CAMPUS");
    }

    #[test]
    fn clean_phone_keeps_digits_only() {
        assert_eq!(clean_phone("+91 90000 3355"), "91900003355");
        assert_eq!(clean_phone("(254) 711-000-111"), "254711000111");
    }

    #[test]
    fn clean_phone_is_idempotent() {
        for raw in ["+91 90000 3355", "", "no digits here", "0123456789"] {
            let once = clean_phone(raw);
            assert_eq!(clean_phone(&once), once);
        }
    }

    #[test]
    fn clean_phone_empty_passes_through() {
        assert_eq!(clean_phone(""), "");
    }
}

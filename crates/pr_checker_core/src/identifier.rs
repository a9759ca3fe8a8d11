//! Extraction of ticket identifiers from commit messages and pull request titles.

use std::sync::OnceLock;

use regex::Regex;

#[cfg(test)]
#[path = "identifier_tests.rs"]
mod tests;

/// A project prefix, a hyphen and an ASCII number, followed by whitespace or a colon.
const ISSUE_KEY_PATTERN: &str = r"^([A-Z]+-[0-9]+)[\s:]";

fn issue_key_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(ISSUE_KEY_PATTERN).expect("issue key pattern is valid"))
}

/// Returns the ticket identifier the text starts with, e.g. `ICU-123` for
/// `ICU-123 Fix number formatting`.
///
/// Only a leading identifier counts; an identifier further into the text, or one
/// that runs straight into other characters, is ignored.
///
/// ```
/// use pr_checker_core::parse_issue_key;
///
/// assert_eq!(parse_issue_key("CLDR-9876: Update plurals"), Some("CLDR-9876"));
/// assert_eq!(parse_issue_key("Fix ICU-123"), None);
/// ```
pub fn parse_issue_key(text: &str) -> Option<&str> {
    issue_key_regex()
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

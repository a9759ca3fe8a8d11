//! Override flags written into a pull request description.
//!
//! Contributors can relax some checks by adding lines of the form `NAME=value` to the
//! pull request description, for example:
//!
//! ```text
//! ALLOW_MANY_COMMITS=true
//! DISABLE_JIRA_ISSUE_MATCH=true # the second commit fixes a related ticket
//! ```

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "flags_tests.rs"]
mod tests;

/// Waives the rule that every commit must reference the pull request ticket.
pub const DISABLE_JIRA_ISSUE_MATCH: &str = "DISABLE_JIRA_ISSUE_MATCH";

/// Lets the single-commit check pass for pull requests with several commits.
pub const ALLOW_MANY_COMMITS: &str = "ALLOW_MANY_COMMITS";

/// An upper case name, `=`, the value, and an optional trailing `#` comment.
const FLAG_LINE_PATTERN: &str = r"^([A-Z_]+)=(.*?)(\s*#.*)?$";

fn flag_line_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(FLAG_LINE_PATTERN).expect("flag line pattern is valid"))
}

/// The typed value of a flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FlagValue {
    /// Coerces a raw value: `true` and `false` become booleans, a value that is
    /// entirely a finite number becomes a number, anything else stays text.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => match raw.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Self::Number(n),
                _ => Self::Text(raw.to_string()),
            },
        }
    }

    /// Whether the flag counts as set: `true`, a non-zero number, or non-empty text.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Text(s) => !s.is_empty(),
        }
    }
}

/// The flags found in a pull request description, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PullRequestFlags(HashMap<String, FlagValue>);

impl PullRequestFlags {
    /// Parses every `NAME=value` line of the text. Lines that do not have that shape
    /// are ignored and the last occurrence of a name wins.
    pub fn parse(text: &str) -> Self {
        let regex = flag_line_regex();
        let flags = text
            .lines()
            .filter_map(|line| regex.captures(line))
            .filter_map(|captures| {
                let name = captures.get(1)?.as_str().to_string();
                let value = captures.get(2).map_or("", |m| m.as_str());
                Some((name, FlagValue::parse(value)))
            })
            .collect();
        Self(flags)
    }

    pub fn get(&self, name: &str) -> Option<&FlagValue> {
        self.0.get(name)
    }

    /// Whether the named flag is present and truthy.
    pub fn is_set(&self, name: &str) -> bool {
        self.get(name).is_some_and(FlagValue::is_truthy)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

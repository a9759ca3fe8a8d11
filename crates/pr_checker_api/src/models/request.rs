//! HTTP request type definitions

use pr_checker_core::SquashRequest;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// Path parameters identifying a pull request: `/:owner/:repo/:pull_number`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequestPath {
    pub owner: String,
    pub repo: String,
    pub pull_number: u64,
}

/// HTTP request to squash a pull request branch.
///
/// # Example
///
/// ```json
/// {
///   "owner": "unicode-org",
///   "repo": "icu",
///   "pullNumber": 42,
///   "title": "ICU-12345 Fix plural rules",
///   "description": "Squashed from 3 commits",
///   "confirm": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DoSquashRequest {
    pub owner: String,
    pub repo: String,
    pub pull_number: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,

    /// The user acknowledged that the branch is rewritten
    #[serde(default)]
    pub confirm: bool,
}

impl DoSquashRequest {
    /// The commit message part of the request.
    pub fn squash_request(&self) -> SquashRequest {
        SquashRequest {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }
}

/// Query parameters of the OAuth callback.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitHubAuthQuery {
    pub code: Option<String>,
    pub state: Option<String>,
}

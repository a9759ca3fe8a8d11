//! HTTP response type definitions
//!
//! HTTP response types use camelCase for JSON serialization.

use github_client::models::PullRequest;
use pr_checker_core::Verdict;
use serde::{Deserialize, Serialize};

/// Everything known about a pull request and its verdict.
///
/// # Example
///
/// ```json
/// {
///   "pullRequest": { "number": 42, "title": "ICU-12345 Fix plural rules", ... },
///   "verdict": { "issueKey": "ICU-12345", "pass": true, ... },
///   "jiraUrl": "https://unicode-org.atlassian.net/browse/ICU-12345",
///   "squashUrl": "https://checker.example.com/squash/unicode-org/icu/42"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub pull_request: PullRequest,
    pub verdict: Verdict,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions_url: Option<String>,
}

/// What a squash would do, shown before the user confirms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SquashPreviewResponse {
    pub pull_request: PullRequest,
    pub verdict: Verdict,

    /// Suggested title of the squash commit
    pub title: String,

    /// Suggested body of the squash commit
    pub description: String,
}

/// HTTP response after a squash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoSquashResponse {
    /// Hash of the squash commit, now the head of the branch
    pub sha: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_url: Option<String>,
}

/// The access token of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status: "healthy" or "unhealthy"
    pub status: String,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Current timestamp (ISO 8601)
    pub timestamp: String,
}

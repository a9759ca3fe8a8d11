//! Checker configuration.
//!
//! The checker rules are driven by a handful of environment-style settings. They are
//! read once at process start into an immutable [`CheckerConfig`] which is then
//! passed into the checker, so the decision logic never reaches into process-wide
//! state.
//!
//! ## Recognized keys
//!
//! | Key | Meaning | Default |
//! |---|---|---|
//! | `JIRA_APPROVED_STATUSES` | comma separated list of accepted ticket statuses | `Accepted, Reviewing, Review Feedback` |
//! | `JIRA_STATUS_CHECK` | `FALSE` skips the ticket status check | enabled |
//! | `SEARCH_JIRA_ISSUE_IN_COMMIT` | `TRUE` checks every commit message for the ticket | disabled |
//! | `ALLOW_MANY_COMMITS` | `TRUE` never publishes the single-commit check | disabled |
//! | `DO_NOT_TOUCH_REPOS` | comma separated `owner/repo` list that is never published to | empty |
//! | `TRUNK_BRANCHES` | comma separated trunk branch names | `main,master` |
//! | `MAINT_BRANCH_PATTERN` | regular expression matched against the source branch | `^maint/` |
//! | `URL_PREFIX` | public base URL of the service | unset |
//! | `INSTRUCTIONS_URL` | link to contributor instructions | unset |
//! | `COMMITTER_NAME`, `COMMITTER_EMAIL` | committer identity for squash commits | unset |
//! | `JIRA_URL` | tracker host name | unset |
//! | `JIRA_USERNAME`, `JIRA_API_TOKEN` | tracker credentials | unset |
//! | `JIRA_RETRY_DELAY_MS` | delay before retrying a failed ticket lookup | `1000` |

use std::collections::HashSet;
use std::time::Duration;

use jira_client::{JiraClient, JiraCredentials, RetryingTicketClient};
use regex::Regex;
use secrecy::SecretString;

use crate::errors::{CheckerError, CheckerResult};

#[cfg(test)]
#[path = "configuration_tests.rs"]
mod tests;

pub const DEFAULT_APPROVED_STATUSES: &str = "Accepted, Reviewing, Review Feedback";
pub const DEFAULT_TRUNK_BRANCHES: &str = "main,master";
pub const DEFAULT_MAINT_BRANCH_PATTERN: &str = "^maint/";
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Identity recorded as the committer of squash commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitterIdentity {
    pub name: String,
    pub email: String,
}

/// Immutable settings for the checker rules and the links it publishes.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Ticket statuses that allow a pull request to pass
    pub approved_statuses: Vec<String>,

    /// Whether the ticket status is checked against `approved_statuses`
    pub status_check: bool,

    /// Whether every commit message must reference the pull request ticket
    pub search_issue_in_commit: bool,

    /// When set the single-commit check is never published
    pub allow_many_commits: bool,

    /// `owner/repo` pairs that are never published to
    pub do_not_touch_repos: HashSet<String>,

    /// Branch names that count as trunk for maintenance merges
    pub trunk_branches: Vec<String>,

    /// Pattern a source branch must match to count as a maintenance branch
    pub maint_branch_pattern: Regex,

    /// Public base URL of the service, without a trailing slash
    pub url_prefix: Option<String>,

    /// Link to contributor instructions
    pub instructions_url: Option<String>,

    /// Committer override for squash commits
    pub committer: Option<CommitterIdentity>,
}

impl CheckerConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> CheckerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through a key lookup function.
    ///
    /// # Errors
    ///
    /// Returns `CheckerError::Configuration` if `MAINT_BRANCH_PATTERN` is not a valid
    /// regular expression.
    pub fn from_lookup<F>(lookup: F) -> CheckerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let pattern = value("MAINT_BRANCH_PATTERN")
            .unwrap_or_else(|| DEFAULT_MAINT_BRANCH_PATTERN.to_string());
        let maint_branch_pattern = Regex::new(&pattern)
            .map_err(|e| CheckerError::configuration("MAINT_BRANCH_PATTERN", e.to_string()))?;

        let committer = match (value("COMMITTER_NAME"), value("COMMITTER_EMAIL")) {
            (Some(name), Some(email)) => Some(CommitterIdentity { name, email }),
            _ => None,
        };

        Ok(Self {
            approved_statuses: split_list(
                &value("JIRA_APPROVED_STATUSES")
                    .unwrap_or_else(|| DEFAULT_APPROVED_STATUSES.to_string()),
            ),
            status_check: value("JIRA_STATUS_CHECK").as_deref() != Some("FALSE"),
            search_issue_in_commit: value("SEARCH_JIRA_ISSUE_IN_COMMIT").as_deref()
                == Some("TRUE"),
            allow_many_commits: value("ALLOW_MANY_COMMITS").as_deref() == Some("TRUE"),
            do_not_touch_repos: value("DO_NOT_TOUCH_REPOS")
                .map(|v| split_list(&v).into_iter().collect())
                .unwrap_or_default(),
            trunk_branches: split_list(
                &value("TRUNK_BRANCHES").unwrap_or_else(|| DEFAULT_TRUNK_BRANCHES.to_string()),
            ),
            maint_branch_pattern,
            url_prefix: value("URL_PREFIX").map(|v| v.trim_end_matches('/').to_string()),
            instructions_url: value("INSTRUCTIONS_URL"),
            committer,
        })
    }

    /// Whether a ticket status is on the approved list.
    pub fn is_approved_status(&self, status: &str) -> bool {
        self.approved_statuses.iter().any(|s| s == status)
    }

    /// Whether the repository is excluded from publishing.
    pub fn is_do_not_touch(&self, owner: &str, repo: &str) -> bool {
        self.do_not_touch_repos.contains(&format!("{}/{}", owner, repo))
    }

    pub fn is_trunk_branch(&self, branch: &str) -> bool {
        self.trunk_branches.iter().any(|b| b == branch)
    }

    /// Builds a link to one of the service pages for a pull request, e.g.
    /// `{URL_PREFIX}/info/{owner}/{repo}/{pull_number}`.
    ///
    /// Returns `None` when no public URL is configured.
    pub fn view_url(
        &self,
        endpoint: &str,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Option<String> {
        self.url_prefix
            .as_ref()
            .map(|prefix| format!("{}/{}/{}/{}/{}", prefix, endpoint, owner, repo, pull_number))
    }
}

/// Settings for reaching the issue tracker.
#[derive(Debug, Clone)]
pub struct TrackerSettings {
    /// Tracker host name, e.g. `unicode-org.atlassian.net`
    pub host: Option<String>,
    pub username: Option<String>,
    pub api_token: Option<SecretString>,
    /// Delay before the single retry of a failed lookup
    pub retry_delay: Duration,
}

impl TrackerSettings {
    pub fn from_env() -> CheckerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the tracker settings through a key lookup function.
    ///
    /// # Errors
    ///
    /// Returns `CheckerError::Configuration` if `JIRA_RETRY_DELAY_MS` is not a number.
    pub fn from_lookup<F>(lookup: F) -> CheckerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let retry_delay_ms = match value("JIRA_RETRY_DELAY_MS") {
            Some(v) => v.trim().parse::<u64>().map_err(|e| {
                CheckerError::configuration("JIRA_RETRY_DELAY_MS", e.to_string())
            })?,
            None => DEFAULT_RETRY_DELAY_MS,
        };

        Ok(Self {
            host: value("JIRA_URL"),
            username: value("JIRA_USERNAME"),
            api_token: value("JIRA_API_TOKEN").map(SecretString::from),
            retry_delay: Duration::from_millis(retry_delay_ms),
        })
    }

    /// Creates the tracker client, wrapped with the single retry policy.
    ///
    /// # Errors
    ///
    /// Returns `CheckerError::Configuration` if `JIRA_URL` is not set, and
    /// `CheckerError::Tracker` if it does not form a valid URL.
    pub fn create_client(&self) -> CheckerResult<RetryingTicketClient<JiraClient>> {
        let host = self
            .host
            .as_deref()
            .ok_or_else(|| CheckerError::configuration("JIRA_URL", "not set"))?;

        let credentials = match (&self.username, &self.api_token) {
            (Some(username), Some(api_token)) => Some(JiraCredentials {
                username: username.clone(),
                api_token: api_token.clone(),
            }),
            _ => None,
        };

        let client = JiraClient::new(host, credentials)?;
        Ok(RetryingTicketClient::new(client, self.retry_delay))
    }

    /// The human-facing link to a ticket, if the tracker host is known.
    pub fn browse_url(&self, issue_key: &str) -> Option<String> {
        self.host
            .as_deref()
            .map(|host| jira_client::browse_url(host, issue_key))
    }
}

/// Splits a comma separated list, trimming entries and dropping empty ones.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

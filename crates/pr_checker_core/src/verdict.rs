//! The verdict of a pull request check and the rules that produce it.
//!
//! ## Rules
//!
//! The rules are applied in order and the first failing rule decides the verdict:
//!
//! 1. The title must start with a ticket identifier.
//! 2. The ticket must exist and have an approved status (unless the status check
//!    is disabled).
//! 3. When commit matching is enabled, every commit message must start with a
//!    ticket identifier, and it must be the pull request ticket unless the
//!    `DISABLE_JIRA_ISSUE_MATCH` flag is set or the pull request is a maintenance
//!    merge.
//! 4. The commit listing must not be full: a full page of commits may hide more.
//!
//! Rule 1 is checked in [`crate::PullRequestChecker::evaluate`] before anything is
//! fetched; [`decide`] applies the remaining rules to the fetched evidence.

use github_client::models::{CommitInfo, PullRequest};
use github_client::COMMITS_PAGE_SIZE;
use jira_client::Ticket;
use serde::{Deserialize, Serialize};

use crate::configuration::CheckerConfig;
use crate::flags::{PullRequestFlags, DISABLE_JIRA_ISSUE_MATCH};
use crate::identifier::parse_issue_key;

#[cfg(test)]
#[path = "verdict_tests.rs"]
mod tests;

pub const MISSING_ISSUE_KEY_DESCRIPTION: &str =
    "Pull request title must start with a Jira ticket ID";

pub const ISSUE_MISMATCH_GUIDANCE: &str = "Please fix your commit message to have the same ticket number as the pull request. If the inconsistency is intentional, you can disable this warning with DISABLE_JIRA_ISSUE_MATCH=true in the PR description.";

/// The outcome of checking one pull request.
///
/// Every verdict past the title check carries the full context (ticket, status,
/// commit count, maintenance merge, flags) whether it passed or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    /// Ticket named by the title, `None` if the title does not start with one
    pub issue_key: Option<String>,

    /// Status of the ticket, `None` if it was not found
    #[serde(default)]
    pub jira_status: Option<String>,

    pub num_commits: usize,

    pub is_maint_merge: bool,

    pub pr_flags: PullRequestFlags,

    pub pass: bool,

    /// Human readable reason
    pub description: String,

    /// The commit that failed the commit message rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bad_commit: Option<CommitInfo>,

    /// Additional guidance for fixing the failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_description: Option<String>,
}

impl Verdict {
    /// The verdict for a pull request whose title does not start with a ticket.
    pub fn missing_issue_key(pr_flags: PullRequestFlags) -> Self {
        Self {
            issue_key: None,
            jira_status: None,
            num_commits: 0,
            is_maint_merge: false,
            pr_flags,
            pass: false,
            description: MISSING_ISSUE_KEY_DESCRIPTION.to_string(),
            bad_commit: None,
            extended_description: None,
        }
    }
}

/// Whether the pull request merges a maintenance branch into a trunk branch of the
/// same repository.
pub fn is_maint_merge(config: &CheckerConfig, pull_request: &PullRequest) -> bool {
    let same_repository = pull_request
        .head
        .repo
        .as_ref()
        .is_some_and(|head| head.full_name == pull_request.base.repo.full_name);

    same_repository
        && config.is_trunk_branch(&pull_request.base.ref_name)
        && config
            .maint_branch_pattern
            .is_match(&pull_request.head.ref_name)
}

/// Applies the ticket, commit message and commit count rules.
pub fn decide(
    config: &CheckerConfig,
    issue_key: &str,
    ticket: Option<&Ticket>,
    commits: &[CommitInfo],
    is_maint_merge: bool,
    pr_flags: PullRequestFlags,
) -> Verdict {
    let jira_status = ticket.map(|t| t.status_name().to_string());

    let base = Verdict {
        issue_key: Some(issue_key.to_string()),
        jira_status: jira_status.clone(),
        num_commits: commits.len(),
        is_maint_merge,
        pr_flags,
        pass: false,
        description: String::new(),
        bad_commit: None,
        extended_description: None,
    };

    if config.status_check {
        match jira_status.as_deref() {
            None => {
                return Verdict {
                    description: format!("Jira ticket {} not found", issue_key),
                    ..base
                };
            }
            Some(status) if !config.is_approved_status(status) => {
                return Verdict {
                    description: format!(
                        "Jira ticket {} is not accepted; it has status {}",
                        issue_key, status
                    ),
                    ..base
                };
            }
            Some(_) => {}
        }
    }

    if config.search_issue_in_commit {
        let issue_match_disabled = base.pr_flags.is_set(DISABLE_JIRA_ISSUE_MATCH);
        for commit in commits {
            match parse_issue_key(&commit.commit.message) {
                None => {
                    return Verdict {
                        description: format!(
                            "Commit message for {} fails validation",
                            commit.short_sha()
                        ),
                        bad_commit: Some(commit.clone()),
                        ..base
                    };
                }
                Some(commit_key)
                    if commit_key != issue_key && !issue_match_disabled && !is_maint_merge =>
                {
                    return Verdict {
                        description: format!(
                            "Commit {} is for {}, but the PR is for {}",
                            commit.short_sha(),
                            commit_key,
                            issue_key
                        ),
                        extended_description: Some(ISSUE_MISMATCH_GUIDANCE.to_string()),
                        bad_commit: Some(commit.clone()),
                        ..base
                    };
                }
                Some(_) => {}
            }
        }
    }

    if commits.len() == COMMITS_PAGE_SIZE {
        return Verdict {
            description: format!(
                "PR has more than {} commits; please rebase and squash",
                COMMITS_PAGE_SIZE
            ),
            ..base
        };
    }

    let summary = ticket.map(|t| t.summary()).unwrap_or_default();
    Verdict {
        pass: true,
        description: format!("{} \u{201C}{}\u{201D}", issue_key, summary),
        ..base
    }
}

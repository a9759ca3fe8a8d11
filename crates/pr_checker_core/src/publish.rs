//! Publishing a verdict as commit statuses.
//!
//! A verdict is reported as up to three named statuses on the head commit:
//!
//! - `jira-ticket`: the verdict itself, linked to the info page when the service
//!   URL is known.
//! - `single-commit`: whether the pull request is a single commit. Several commits
//!   are fine for maintenance merges or with the `ALLOW_MANY_COMMITS` flag. This
//!   status is not published at all when many commits are allowed globally.
//! - `maint-merge`: published for maintenance merges only, and always as a failure.
//!   It is a reminder for whoever merges: it has to be a merge commit with a new
//!   ticket in its message, and the failure keeps it visible until then.

use futures::future::try_join_all;
use github_client::models::{CommitStatus, PullRequest, PullRequestState, StatusState};
use tracing::{info, instrument};

use crate::checker::PullRequestChecker;
use crate::configuration::CheckerConfig;
use crate::errors::CheckerResult;
use crate::flags::ALLOW_MANY_COMMITS;
use crate::verdict::Verdict;

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;

pub const TICKET_CONTEXT: &str = "jira-ticket";
pub const SINGLE_COMMIT_CONTEXT: &str = "single-commit";
pub const MAINT_MERGE_CONTEXT: &str = "maint-merge";

pub const MAINT_MERGE_REMINDER: &str =
    "Reminder: use a MERGE COMMIT and new ticket in the message.";

/// GitHub rejects status descriptions over 140 characters.
pub const MAX_DESCRIPTION_CHARS: usize = 130;

/// Why a pull request was not published to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The repository is on the do-not-touch list.
    DoNotTouch,
    /// The pull request is no longer open.
    NotOpen(PullRequestState),
}

/// The result of [`PullRequestChecker::publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Skipped(SkipReason),
    /// The statuses were created; holds their contexts.
    Published(Vec<String>),
}

/// Truncates a description to [`MAX_DESCRIPTION_CHARS`] characters.
pub fn truncate_description(description: &str) -> String {
    description.chars().take(MAX_DESCRIPTION_CHARS).collect()
}

/// Whether the single-commit status passes.
pub fn single_commit_pass(verdict: &Verdict) -> bool {
    match verdict.num_commits {
        0 => false,
        1 => true,
        _ => verdict.is_maint_merge || verdict.pr_flags.is_set(ALLOW_MANY_COMMITS),
    }
}

fn single_commit_message(verdict: &Verdict, pass: bool) -> String {
    match verdict.num_commits {
        0 => "No commits found on PR".to_string(),
        1 => "This PR includes exactly 1 commit!".to_string(),
        n if pass => format!("This PR has {} commits", n),
        n => format!("This PR has {} commits; consider squashing:", n),
    }
}

/// Builds the statuses a verdict is reported as, in publishing order.
pub fn plan_statuses(
    config: &CheckerConfig,
    pull_request: &PullRequest,
    verdict: &Verdict,
) -> Vec<CommitStatus> {
    let mut statuses = vec![CommitStatus {
        state: StatusState::from_pass(verdict.pass),
        target_url: config.view_url(
            "info",
            pull_request.owner(),
            pull_request.repo(),
            pull_request.number,
        ),
        description: truncate_description(&verdict.description),
        context: TICKET_CONTEXT.to_string(),
    }];

    if !config.allow_many_commits {
        let pass = single_commit_pass(verdict);
        statuses.push(CommitStatus {
            state: StatusState::from_pass(pass),
            target_url: None,
            description: truncate_description(&single_commit_message(verdict, pass)),
            context: SINGLE_COMMIT_CONTEXT.to_string(),
        });
    }

    if verdict.is_maint_merge {
        statuses.push(CommitStatus {
            state: StatusState::Failure,
            target_url: None,
            description: MAINT_MERGE_REMINDER.to_string(),
            context: MAINT_MERGE_CONTEXT.to_string(),
        });
    }

    statuses
}

impl PullRequestChecker {
    /// Publishes a verdict as commit statuses on the pull request head commit.
    ///
    /// Nothing is published for repositories on the do-not-touch list or for pull
    /// requests that are not open. The statuses are created concurrently.
    ///
    /// # Errors
    ///
    /// Returns an error if any status cannot be created.
    #[instrument(skip(self, pull_request, verdict), fields(owner = %pull_request.owner(), repo = %pull_request.repo(), pull_number = pull_request.number))]
    pub async fn publish(
        &self,
        pull_request: &PullRequest,
        verdict: &Verdict,
    ) -> CheckerResult<PublishOutcome> {
        let owner = pull_request.owner();
        let repo = pull_request.repo();

        if self.config.is_do_not_touch(owner, repo) {
            info!("Not touching: repository is on the do-not-touch list");
            return Ok(PublishOutcome::Skipped(SkipReason::DoNotTouch));
        }

        if !pull_request.is_open() {
            info!(state = pull_request.state.as_str(), "Not touching: pull request is not open");
            return Ok(PublishOutcome::Skipped(SkipReason::NotOpen(
                pull_request.state,
            )));
        }

        let statuses = plan_statuses(&self.config, pull_request, verdict);
        let sha = pull_request.head.sha.as_str();
        try_join_all(statuses.iter().map(|status| {
            info!(
                context = %status.context,
                sha = sha,
                description = %status.description,
                "Setting status"
            );
            self.github.create_commit_status(owner, repo, sha, status)
        }))
        .await?;

        Ok(PublishOutcome::Published(
            statuses.into_iter().map(|s| s.context).collect(),
        ))
    }
}

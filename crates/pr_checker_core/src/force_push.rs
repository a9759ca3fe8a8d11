//! Detection of file changes across a force-push.
//!
//! When a pull request branch is force-pushed, reviewers lose the ability to see
//! what changed since their last look. The reconciler compares the files changed by
//! the old and the new branch tip relative to the pull request base and posts a
//! comment listing every file whose change differs between the two.

use std::cmp::Ordering;
use std::fmt;

use github_client::models::{short_sha, CompareStatus, FileDiffEntry, PullRequest};
use tracing::{info, instrument};

use crate::checker::PullRequestChecker;
use crate::errors::{CheckerError, CheckerResult};

#[cfg(test)]
#[path = "force_push_tests.rs"]
mod tests;

pub const COMMENT_FOOTER: &str = "~ Your Friendly Jira-GitHub PR Checker Bot";

const UNNAMED_FILE: &str = "(unnamed file)";

/// A file whose change differs between the old and the new branch tip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileDiscrepancy {
    /// Changed by both tips, but with different content.
    Different(String),
    /// Changed by the old tip only.
    NoLongerChanged(String),
    /// Changed by the new tip only.
    NowChanged(String),
}

impl fmt::Display for FileDiscrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Different(name) => write!(f, "{} is different", name),
            Self::NoLongerChanged(name) => write!(f, "{} is no longer changed in the branch", name),
            Self::NowChanged(name) => write!(f, "{} is now changed in the branch", name),
        }
    }
}

/// The result of [`PullRequestChecker::reconcile_force_push`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForcePushOutcome {
    /// The new tip is not diverged from the old one, so this was a normal push.
    NotForcePush(CompareStatus),
    /// A comment was posted listing the discrepancies, if any.
    Commented(Vec<FileDiscrepancy>),
}

/// Files with a name sort before files without one.
fn compare_filenames(a: &FileDiffEntry, b: &FileDiffEntry) -> Ordering {
    match (&a.filename, &b.filename) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn display_name(entry: &FileDiffEntry) -> String {
    entry
        .filename
        .clone()
        .unwrap_or_else(|| UNNAMED_FILE.to_string())
}

/// Compares the files changed by the old tip with those changed by the new tip.
///
/// Both lists are sorted by file name and walked in lockstep: a file in both lists
/// is reported if its content hash differs, and a file in only one list is reported
/// as no longer or newly changed.
pub fn compare_file_changes(
    before: &[FileDiffEntry],
    after: &[FileDiffEntry],
) -> Vec<FileDiscrepancy> {
    let mut before: Vec<&FileDiffEntry> = before.iter().collect();
    let mut after: Vec<&FileDiffEntry> = after.iter().collect();
    before.sort_by(|a, b| compare_filenames(a, b));
    after.sort_by(|a, b| compare_filenames(a, b));

    let mut discrepancies = Vec::new();
    let (mut i, mut j) = (0, 0);
    loop {
        match (before.get(i), after.get(j)) {
            (None, None) => break,
            (Some(old), None) => {
                discrepancies.push(FileDiscrepancy::NoLongerChanged(display_name(old)));
                i += 1;
            }
            (None, Some(new)) => {
                discrepancies.push(FileDiscrepancy::NowChanged(display_name(new)));
                j += 1;
            }
            (Some(old), Some(new)) => match compare_filenames(old, new) {
                Ordering::Equal => {
                    if old.sha != new.sha {
                        discrepancies.push(FileDiscrepancy::Different(display_name(old)));
                    }
                    i += 1;
                    j += 1;
                }
                Ordering::Less => {
                    discrepancies.push(FileDiscrepancy::NoLongerChanged(display_name(old)));
                    i += 1;
                }
                Ordering::Greater => {
                    discrepancies.push(FileDiscrepancy::NowChanged(display_name(new)));
                    j += 1;
                }
            },
        }
    }
    discrepancies
}

/// Builds the comment posted after a force-push.
pub fn force_push_comment(
    owner: &str,
    repo: &str,
    before: &str,
    after: &str,
    discrepancies: &[FileDiscrepancy],
) -> String {
    let mut body = if discrepancies.is_empty() {
        "Hooray! The files in the branch are the same across the force-push. \u{1F603}".to_string()
    } else {
        let mut body = String::from("Notice: the branch changed across the force-push!\n\n");
        for discrepancy in discrepancies {
            body.push_str(&format!("- {}\n", discrepancy));
        }
        body.push_str(&format!(
            "\n[View Diff Across Force-Push](https://github.com/{owner}/{repo}/compare/{owner}:{}..{owner}:{})",
            short_sha(before),
            short_sha(after),
        ));
        body
    };
    body.push_str("\n\n");
    body.push_str(COMMENT_FOOTER);
    body
}

impl PullRequestChecker {
    /// Reports file changes across a push to the pull request branch.
    ///
    /// Pushes where the new tip is ahead of, behind, or identical to the old tip are
    /// ignored. For a force-push the changes of both tips relative to the pull
    /// request base are fetched concurrently and compared, and a comment with the
    /// result is posted on the pull request.
    ///
    /// # Errors
    ///
    /// Returns an error if a comparison cannot be fetched or the comment cannot be
    /// posted.
    #[instrument(skip(self, pull_request), fields(owner = %pull_request.owner(), repo = %pull_request.repo(), pull_number = pull_request.number))]
    pub async fn reconcile_force_push(
        &self,
        before: &str,
        after: &str,
        pull_request: &PullRequest,
    ) -> CheckerResult<ForcePushOutcome> {
        let owner = pull_request.owner();
        let repo = pull_request.repo();

        let push = self.github.compare_commits(owner, repo, before, after).await?;
        if push.status != CompareStatus::Diverged {
            info!(status = push.status.as_str(), "Push to branch was not a force-push");
            return Ok(ForcePushOutcome::NotForcePush(push.status));
        }

        let base = pull_request.base.sha.as_str();
        let (old_changes, new_changes) = tokio::try_join!(
            async {
                self.github
                    .compare_commits(owner, repo, base, before)
                    .await
                    .map_err(CheckerError::from)
            },
            async {
                self.github
                    .compare_commits(owner, repo, base, after)
                    .await
                    .map_err(CheckerError::from)
            },
        )?;

        let discrepancies = compare_file_changes(&old_changes.files, &new_changes.files);
        info!(
            before = before,
            after = after,
            discrepancies = discrepancies.len(),
            "Force-push reconciled"
        );

        let body = force_push_comment(owner, repo, before, after, &discrepancies);
        self.github
            .create_issue_comment(owner, repo, pull_request.number, &body)
            .await?;

        Ok(ForcePushOutcome::Commented(discrepancies))
    }
}

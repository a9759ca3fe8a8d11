//! Squashing a pull request branch into a single commit.
//!
//! The squash commit records the tree of the branch head on top of the pull request
//! base, keeps the author of the head commit, and replaces the branch with a force
//! update. The operation runs with the credentials of the signed-in user, so a
//! rejected token is reported as [`CheckerError::AuthenticationRequired`].

use chrono::{SecondsFormat, Utc};
use github_client::models::{GitCommitCreatePayload, PullRequest};
use github_client::GitDataClient;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::configuration::CommitterIdentity;
use crate::errors::{CheckerError, CheckerResult};

#[cfg(test)]
#[path = "squash_tests.rs"]
mod tests;

/// The message of the squash commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquashRequest {
    pub title: String,
    pub description: String,
}

impl SquashRequest {
    /// The title, a blank line, and the description.
    pub fn message(&self) -> String {
        format!("{}\n\n{}", self.title, self.description)
    }
}

fn user_error(err: github_client::Error) -> CheckerError {
    match err {
        github_client::Error::Unauthorized => CheckerError::AuthenticationRequired,
        other => CheckerError::GitHub(other),
    }
}

/// Replaces the pull request branch with a single commit and returns its hash.
///
/// The committer is the original author with the current time, or `committer`
/// when given.
///
/// # Errors
///
/// Returns `CheckerError::MissingHeadRepository` if the source repository was
/// deleted, `CheckerError::AuthenticationRequired` if the user credentials were
/// rejected, and `CheckerError::GitHub` for any other failure.
#[instrument(skip(git, pull_request, request, committer), fields(pull_number = pull_request.number, branch = %pull_request.head.ref_name))]
pub async fn squash(
    git: &dyn GitDataClient,
    pull_request: &PullRequest,
    request: &SquashRequest,
    committer: Option<&CommitterIdentity>,
) -> CheckerResult<String> {
    let head_repo = pull_request
        .head
        .repo
        .as_ref()
        .ok_or(CheckerError::MissingHeadRepository)?;
    let owner = head_repo.owner.login.as_str();
    let repo = head_repo.name.as_str();

    let head = git
        .get_git_commit(owner, repo, &pull_request.head.sha)
        .await
        .map_err(user_error)?;

    let mut new_committer = head.author.clone();
    new_committer.date = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    if let Some(identity) = committer {
        new_committer.name = identity.name.clone();
        new_committer.email = identity.email.clone();
    }

    let payload = GitCommitCreatePayload {
        message: request.message(),
        tree: head.tree.sha,
        parents: vec![pull_request.base.sha.clone()],
        author: head.author,
        committer: new_committer,
    };
    let commit = git
        .create_git_commit(owner, repo, &payload)
        .await
        .map_err(user_error)?;

    git.update_branch_ref(owner, repo, &pull_request.head.ref_name, &commit.sha, true)
        .await
        .map_err(user_error)?;

    info!(
        owner = owner,
        repo = repo,
        sha = %commit.sha,
        "Squashed pull request branch"
    );
    Ok(commit.sha)
}

//! # Models
//!
//! This module contains the data models exchanged with the GitHub REST API.
//!
//! Only the fields the checker reads are modelled; any additional fields in the
//! GitHub responses are ignored during deserialization. The pull request models are
//! read-only snapshots, the payload types are what gets sent back to GitHub.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// The owner (user or organization) of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// The login name of the account
    pub login: String,
}

/// The repository a pull request branch lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    /// The repository name, e.g. `icu`
    pub name: String,
    /// The `owner/name` form, e.g. `unicode-org/icu`
    pub full_name: String,
    /// The account owning the repository
    pub owner: Owner,
}

/// The target branch of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseBranch {
    /// Branch name, e.g. `main`
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Commit the branch pointed at when the snapshot was taken
    pub sha: String,
    /// Repository hosting the pull request
    pub repo: RepositoryRef,
}

/// The source branch of a pull request.
///
/// The repository is optional because GitHub reports `null` once the fork a pull
/// request was opened from has been deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadBranch {
    /// Branch name, e.g. `maint/maint-72`
    #[serde(rename = "ref")]
    pub ref_name: String,
    /// Tip commit of the branch
    pub sha: String,
    /// Repository holding the branch, if it still exists
    #[serde(default)]
    pub repo: Option<RepositoryRef>,
}

/// The lifecycle state of a pull request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    Open,
    Closed,
    Merged,
}

impl PullRequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Merged => "merged",
        }
    }
}

/// A read-only snapshot of a pull request.
///
/// # Examples
///
/// ```
/// use github_client::models::PullRequest;
///
/// let pr: PullRequest = serde_json::from_value(serde_json::json!({
///     "number": 4,
///     "title": "ICU-123 Fix the thing",
///     "body": null,
///     "state": "open",
///     "base": {
///         "ref": "main",
///         "sha": "1111111111111111111111111111111111111111",
///         "repo": { "name": "icu", "full_name": "unicode-org/icu", "owner": { "login": "unicode-org" } }
///     },
///     "head": {
///         "ref": "fix",
///         "sha": "2222222222222222222222222222222222222222",
///         "repo": { "name": "icu", "full_name": "someone/icu", "owner": { "login": "someone" } }
///     }
/// })).unwrap();
///
/// assert_eq!(pr.owner(), "unicode-org");
/// assert_eq!(pr.body_text(), "");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// The pull request number within the base repository
    pub number: u64,
    /// The pull request title
    pub title: String,
    /// The pull request description, `None` when left empty
    #[serde(default)]
    pub body: Option<String>,
    /// Current state
    pub state: PullRequestState,
    /// Target branch
    pub base: BaseBranch,
    /// Source branch
    pub head: HeadBranch,
}

impl PullRequest {
    /// Login of the account owning the base repository.
    pub fn owner(&self) -> &str {
        &self.base.repo.owner.login
    }

    /// Name of the base repository.
    pub fn repo(&self) -> &str {
        &self.base.repo.name
    }

    /// The description, with an empty description represented as an empty string.
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn is_open(&self) -> bool {
        self.state == PullRequestState::Open
    }
}

/// The commit data nested inside a pull request commit listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitDetail {
    /// Full commit message
    pub message: String,
}

/// One entry of the pull request commit listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash
    pub sha: String,
    /// Commit metadata
    pub commit: CommitDetail,
}

impl CommitInfo {
    /// The abbreviated 7 character form of the commit hash.
    pub fn short_sha(&self) -> &str {
        short_sha(&self.sha)
    }
}

/// Returns the abbreviated 7 character form of a commit hash.
pub fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// How the head of a comparison relates to its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareStatus {
    Ahead,
    Behind,
    Identical,
    Diverged,
}

impl CompareStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ahead => "ahead",
            Self::Behind => "behind",
            Self::Identical => "identical",
            Self::Diverged => "diverged",
        }
    }
}

/// A file changed between two commits.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileDiffEntry {
    /// Path of the file
    #[serde(default)]
    pub filename: Option<String>,
    /// Blob hash of the file content after the change
    #[serde(default)]
    pub sha: Option<String>,
}

/// The result of comparing two commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitComparison {
    /// Relationship of head to base
    pub status: CompareStatus,
    /// Files changed between base and head
    #[serde(default)]
    pub files: Vec<FileDiffEntry>,
}

/// The state reported by a commit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Error,
    Failure,
    Pending,
    Success,
}

impl StatusState {
    pub fn from_pass(pass: bool) -> Self {
        if pass {
            Self::Success
        } else {
            Self::Failure
        }
    }
}

/// Payload for creating a commit status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitStatus {
    pub state: StatusState,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_url: Option<String>,

    pub description: String,

    /// The name of the check, e.g. `jira-ticket`
    pub context: String,
}

/// Author or committer identity of a git commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitSignature {
    pub name: String,
    pub email: String,
    /// ISO 8601 timestamp
    pub date: String,
}

/// Reference to a git tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitTree {
    pub sha: String,
}

/// A git commit object as returned by the git data API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitCommit {
    pub sha: String,
    pub tree: GitTree,
    pub author: GitSignature,
    pub committer: GitSignature,
    #[serde(default)]
    pub message: String,
}

/// Payload for creating a git commit object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitCommitCreatePayload {
    pub message: String,
    /// Hash of the tree the commit records
    pub tree: String,
    pub parents: Vec<String>,
    pub author: GitSignature,
    pub committer: GitSignature,
}

/// Payload for moving a branch reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRefPayload {
    pub sha: String,
    pub force: bool,
}

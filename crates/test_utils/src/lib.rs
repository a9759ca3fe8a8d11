//! Test utilities shared by the checker crates.
//!
//! This crate provides pull request, commit and ticket fixtures plus in-memory
//! implementations of the collaborator traits. The fakes record every call so tests
//! can assert on what was fetched and what was published.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use github_client::models::{
    BaseBranch, CommitComparison, CommitDetail, CommitInfo, CommitStatus, CompareStatus,
    FileDiffEntry, GitCommit, GitCommitCreatePayload, GitSignature, GitTree, HeadBranch, Owner,
    PullRequest, PullRequestState, RepositoryRef,
};
use github_client::{Error as GitHubError, GitDataClient, PullRequestClient};
use jira_client::{Error as TrackerError, Ticket, TicketClient, TicketFields, TicketStatus};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

pub const OWNER: &str = "unicode-org";
pub const REPO: &str = "icu";
pub const PULL_NUMBER: u64 = 42;
pub const BASE_SHA: &str = "b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0";
pub const HEAD_SHA: &str = "f00df00df00df00df00df00df00df00df00df00d";
pub const TREE_SHA: &str = "7ee07ee07ee07ee07ee07ee07ee07ee07ee07ee0";
pub const SQUASHED_SHA: &str = "5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a5a";

fn repository(owner: &str, name: &str) -> RepositoryRef {
    RepositoryRef {
        name: name.to_string(),
        full_name: format!("{}/{}", owner, name),
        owner: Owner {
            login: owner.to_string(),
        },
    }
}

/// An open pull request from a fork branch into `main` of `unicode-org/icu`.
pub fn pull_request(title: &str, body: Option<&str>) -> PullRequest {
    PullRequest {
        number: PULL_NUMBER,
        title: title.to_string(),
        body: body.map(str::to_string),
        state: PullRequestState::Open,
        base: BaseBranch {
            ref_name: "main".to_string(),
            sha: BASE_SHA.to_string(),
            repo: repository(OWNER, REPO),
        },
        head: HeadBranch {
            ref_name: "fix-plurals".to_string(),
            sha: HEAD_SHA.to_string(),
            repo: Some(repository("contributor", REPO)),
        },
    }
}

/// An open pull request merging `maint/maint-72` into `main` within `unicode-org/icu`.
pub fn maint_pull_request(title: &str) -> PullRequest {
    let mut pr = pull_request(title, None);
    pr.head.ref_name = "maint/maint-72".to_string();
    pr.head.repo = Some(repository(OWNER, REPO));
    pr
}

pub fn commit(sha: &str, message: &str) -> CommitInfo {
    CommitInfo {
        sha: sha.to_string(),
        commit: CommitDetail {
            message: message.to_string(),
        },
    }
}

/// `count` commits, all referencing `issue_key`, with distinct hashes.
pub fn commits_for(issue_key: &str, count: usize) -> Vec<CommitInfo> {
    (0..count)
        .map(|i| commit(&format!("{:040x}", i + 1), &format!("{} Change {}", issue_key, i)))
        .collect()
}

pub fn ticket(key: &str, status: &str, summary: &str) -> Ticket {
    Ticket {
        key: key.to_string(),
        fields: TicketFields {
            status: TicketStatus {
                name: status.to_string(),
            },
            summary: summary.to_string(),
        },
    }
}

pub fn file(filename: &str, sha: &str) -> FileDiffEntry {
    FileDiffEntry {
        filename: Some(filename.to_string()),
        sha: Some(sha.to_string()),
    }
}

pub fn comparison(status: CompareStatus, files: Vec<FileDiffEntry>) -> CommitComparison {
    CommitComparison { status, files }
}

pub fn signature(name: &str, email: &str, date: &str) -> GitSignature {
    GitSignature {
        name: name.to_string(),
        email: email.to_string(),
        date: date.to_string(),
    }
}

/// The head commit of [`pull_request`], authored and committed by its contributor.
pub fn head_git_commit() -> GitCommit {
    let author = signature("Contributor", "contributor@example.com", "2024-01-02T03:04:05Z");
    GitCommit {
        sha: HEAD_SHA.to_string(),
        tree: GitTree {
            sha: TREE_SHA.to_string(),
        },
        author: author.clone(),
        committer: author,
        message: "ICU-1 Work in progress".to_string(),
    }
}

/// A call made against [`FakeGitHub`].
#[derive(Debug, Clone, PartialEq)]
pub enum GitHubCall {
    GetPullRequest {
        owner: String,
        repo: String,
        pull_number: u64,
    },
    ListCommits {
        owner: String,
        repo: String,
        pull_number: u64,
    },
    Compare {
        owner: String,
        repo: String,
        base: String,
        head: String,
    },
    CreateStatus {
        owner: String,
        repo: String,
        sha: String,
        status: CommitStatus,
    },
    CreateComment {
        owner: String,
        repo: String,
        issue_number: u64,
        body: String,
    },
    GetGitCommit {
        owner: String,
        repo: String,
        sha: String,
    },
    CreateGitCommit {
        owner: String,
        repo: String,
        payload: GitCommitCreatePayload,
    },
    UpdateRef {
        owner: String,
        repo: String,
        branch: String,
        sha: String,
        force: bool,
    },
}

/// An in-memory hosting platform.
///
/// Unknown pull requests, comparisons and git commits answer `NotFound`. With
/// [`FakeGitHub::failing_with_status`] every call fails as GitHub would for that
/// HTTP status.
#[derive(Debug, Default)]
pub struct FakeGitHub {
    pull_requests: HashMap<u64, PullRequest>,
    commits: Vec<CommitInfo>,
    comparisons: HashMap<(String, String), CommitComparison>,
    git_commits: HashMap<String, GitCommit>,
    failure_status: Option<u16>,
    calls: Mutex<Vec<GitHubCall>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pull_request(mut self, pull_request: PullRequest) -> Self {
        self.pull_requests.insert(pull_request.number, pull_request);
        self
    }

    pub fn with_commits(mut self, commits: Vec<CommitInfo>) -> Self {
        self.commits = commits;
        self
    }

    pub fn with_comparison(mut self, base: &str, head: &str, comparison: CommitComparison) -> Self {
        self.comparisons
            .insert((base.to_string(), head.to_string()), comparison);
        self
    }

    pub fn with_git_commit(mut self, commit: GitCommit) -> Self {
        self.git_commits.insert(commit.sha.clone(), commit);
        self
    }

    pub fn failing_with_status(mut self, status: u16) -> Self {
        self.failure_status = Some(status);
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<GitHubCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The commit statuses created so far.
    pub fn statuses(&self) -> Vec<CommitStatus> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GitHubCall::CreateStatus { status, .. } => Some(status),
                _ => None,
            })
            .collect()
    }

    /// The bodies of the comments posted so far.
    pub fn comments(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                GitHubCall::CreateComment { body, .. } => Some(body),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: GitHubCall) -> Result<(), GitHubError> {
        self.calls.lock().unwrap().push(call);
        match self.failure_status {
            Some(status) => Err(GitHubError::from_status(status)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl PullRequestClient for FakeGitHub {
    async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Result<PullRequest, GitHubError> {
        self.record(GitHubCall::GetPullRequest {
            owner: owner.to_string(),
            repo: repo.to_string(),
            pull_number,
        })?;
        self.pull_requests
            .get(&pull_number)
            .cloned()
            .ok_or(GitHubError::NotFound)
    }

    async fn list_pull_request_commits(
        &self,
        owner: &str,
        repo: &str,
        pull_number: u64,
    ) -> Result<Vec<CommitInfo>, GitHubError> {
        self.record(GitHubCall::ListCommits {
            owner: owner.to_string(),
            repo: repo.to_string(),
            pull_number,
        })?;
        Ok(self.commits.clone())
    }

    async fn compare_commits(
        &self,
        owner: &str,
        repo: &str,
        base: &str,
        head: &str,
    ) -> Result<CommitComparison, GitHubError> {
        self.record(GitHubCall::Compare {
            owner: owner.to_string(),
            repo: repo.to_string(),
            base: base.to_string(),
            head: head.to_string(),
        })?;
        self.comparisons
            .get(&(base.to_string(), head.to_string()))
            .cloned()
            .ok_or(GitHubError::NotFound)
    }

    async fn create_commit_status(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<(), GitHubError> {
        self.record(GitHubCall::CreateStatus {
            owner: owner.to_string(),
            repo: repo.to_string(),
            sha: sha.to_string(),
            status: status.clone(),
        })
    }

    async fn create_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        body: &str,
    ) -> Result<(), GitHubError> {
        self.record(GitHubCall::CreateComment {
            owner: owner.to_string(),
            repo: repo.to_string(),
            issue_number,
            body: body.to_string(),
        })
    }
}

#[async_trait]
impl GitDataClient for FakeGitHub {
    async fn get_git_commit(
        &self,
        owner: &str,
        repo: &str,
        sha: &str,
    ) -> Result<GitCommit, GitHubError> {
        self.record(GitHubCall::GetGitCommit {
            owner: owner.to_string(),
            repo: repo.to_string(),
            sha: sha.to_string(),
        })?;
        self.git_commits
            .get(sha)
            .cloned()
            .ok_or(GitHubError::NotFound)
    }

    /// Answers with a commit whose hash is [`SQUASHED_SHA`].
    async fn create_git_commit(
        &self,
        owner: &str,
        repo: &str,
        payload: &GitCommitCreatePayload,
    ) -> Result<GitCommit, GitHubError> {
        self.record(GitHubCall::CreateGitCommit {
            owner: owner.to_string(),
            repo: repo.to_string(),
            payload: payload.clone(),
        })?;
        Ok(GitCommit {
            sha: SQUASHED_SHA.to_string(),
            tree: GitTree {
                sha: payload.tree.clone(),
            },
            author: payload.author.clone(),
            committer: payload.committer.clone(),
            message: payload.message.clone(),
        })
    }

    async fn update_branch_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
        force: bool,
    ) -> Result<(), GitHubError> {
        self.record(GitHubCall::UpdateRef {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
            sha: sha.to_string(),
            force,
        })
    }
}

/// An in-memory issue tracker.
///
/// Unknown tickets are reported as missing. With
/// [`FakeTracker::failing_with_status`] every lookup fails with that HTTP status.
#[derive(Debug, Default)]
pub struct FakeTracker {
    tickets: HashMap<String, Ticket>,
    failure_status: Option<u16>,
    lookups: Mutex<Vec<String>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticket(mut self, ticket: Ticket) -> Self {
        self.tickets.insert(ticket.key.clone(), ticket);
        self
    }

    pub fn failing_with_status(mut self, status: u16) -> Self {
        self.failure_status = Some(status);
        self
    }

    /// The ticket keys looked up so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl TicketClient for FakeTracker {
    async fn fetch_ticket(&self, issue_key: &str) -> Result<Option<Ticket>, TrackerError> {
        self.lookups.lock().unwrap().push(issue_key.to_string());
        match self.failure_status {
            Some(status) => Err(TrackerError::Status { status }),
            None => Ok(self.tickets.get(issue_key).cloned()),
        }
    }
}

//! Tests for test utilities.

use super::*;

#[test]
fn test_maint_pull_request_is_same_repository() {
    let pr = maint_pull_request("ICU-1 Merge maint");

    assert_eq!(pr.head.ref_name, "maint/maint-72");
    assert_eq!(
        pr.head.repo.as_ref().map(|r| r.full_name.as_str()),
        Some("unicode-org/icu")
    );
}

#[test]
fn test_commits_for_have_distinct_hashes() {
    let commits = commits_for("ICU-1", 3);

    assert_eq!(commits.len(), 3);
    assert_ne!(commits[0].sha, commits[1].sha);
    assert_eq!(commits[2].commit.message, "ICU-1 Change 2");
    assert_eq!(commits[0].sha.len(), 40);
}

#[tokio::test]
async fn test_fake_github_records_calls() {
    let github = FakeGitHub::new().with_pull_request(pull_request("ICU-1 Title", None));

    let pr = github.get_pull_request(OWNER, REPO, PULL_NUMBER).await.unwrap();
    let missing = github.get_pull_request(OWNER, REPO, 7).await;

    assert_eq!(pr.title, "ICU-1 Title");
    assert!(matches!(missing, Err(GitHubError::NotFound)));
    assert_eq!(github.calls().len(), 2);
}

#[tokio::test]
async fn test_fake_github_failure_status() {
    let github = FakeGitHub::new().failing_with_status(401);

    let result = github.list_pull_request_commits(OWNER, REPO, PULL_NUMBER).await;

    assert!(matches!(result, Err(GitHubError::Unauthorized)));
}

#[tokio::test]
async fn test_fake_tracker() {
    let tracker = FakeTracker::new().with_ticket(ticket("ICU-1", "Accepted", "Summary"));

    assert!(tracker.fetch_ticket("ICU-1").await.unwrap().is_some());
    assert!(tracker.fetch_ticket("ICU-2").await.unwrap().is_none());
    assert_eq!(tracker.lookups(), vec!["ICU-1", "ICU-2"]);
}

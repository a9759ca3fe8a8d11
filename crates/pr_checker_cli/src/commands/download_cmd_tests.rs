use super::*;

use github_client::models::PullRequest;
use test_utils::{pull_request, FakeGitHub, OWNER, PULL_NUMBER, REPO};

fn args(number: u64) -> PullRequestArgs {
    PullRequestArgs {
        owner: OWNER.to_string(),
        repo: REPO.to_string(),
        number,
    }
}

#[tokio::test]
async fn test_download_prints_snapshot() {
    let pr = pull_request("ICU-123 Fix number formatting", Some("ALLOW_MANY_COMMITS=true"));
    let github = FakeGitHub::new().with_pull_request(pr.clone());

    let output = download(&github, &args(PULL_NUMBER)).await.unwrap();

    let parsed: PullRequest = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed, pr);
}

#[tokio::test]
async fn test_download_unknown_pull_request_is_not_found() {
    let github = FakeGitHub::new();

    let result = download(&github, &args(999)).await;

    match result {
        Err(Error::Checker(e)) => assert!(e.is_not_found()),
        other => panic!("Expected not found, got {:?}", other),
    }
}

use super::*;
use test_utils::{
    commit, commits_for, maint_pull_request, pull_request, ticket, FakeGitHub, FakeTracker,
    GitHubCall, OWNER, PULL_NUMBER, REPO,
};

fn strict_config() -> Arc<CheckerConfig> {
    Arc::new(
        CheckerConfig::from_lookup(|key| {
            (key == "SEARCH_JIRA_ISSUE_IN_COMMIT").then(|| "TRUE".to_string())
        })
        .unwrap(),
    )
}

fn checker(
    config: Arc<CheckerConfig>,
    github: &Arc<FakeGitHub>,
    tracker: &Arc<FakeTracker>,
) -> PullRequestChecker {
    PullRequestChecker::new(config, github.clone(), tracker.clone())
}

#[tokio::test]
async fn test_title_without_ticket_makes_no_fetches() {
    let github = Arc::new(FakeGitHub::new());
    let tracker = Arc::new(FakeTracker::new());
    let checker = checker(strict_config(), &github, &tracker);

    let pr = pull_request("Fix the plural rules", Some("ALLOW_MANY_COMMITS=true"));
    let verdict = checker.evaluate(&pr).await.unwrap();

    assert!(!verdict.pass);
    assert!(verdict.issue_key.is_none());
    assert!(verdict.pr_flags.is_set("ALLOW_MANY_COMMITS"));
    assert!(github.calls().is_empty());
    assert!(tracker.lookups().is_empty());
}

#[tokio::test]
async fn test_accepted_ticket_and_matching_commit_passes() {
    let github = Arc::new(FakeGitHub::new().with_commits(commits_for("ICU-123", 1)));
    let tracker = Arc::new(
        FakeTracker::new().with_ticket(ticket("ICU-123", "Accepted", "Fix number formatting")),
    );
    let checker = checker(strict_config(), &github, &tracker);

    let verdict = checker
        .evaluate(&pull_request("ICU-123 Fix number formatting", None))
        .await
        .unwrap();

    assert!(verdict.pass);
    assert_eq!(tracker.lookups(), vec!["ICU-123"]);
    assert_eq!(
        github.calls(),
        vec![GitHubCall::ListCommits {
            owner: OWNER.to_string(),
            repo: REPO.to_string(),
            pull_number: PULL_NUMBER,
        }]
    );
}

#[tokio::test]
async fn test_open_ticket_fails_with_status_name() {
    let github = Arc::new(FakeGitHub::new().with_commits(commits_for("ICU-7", 1)));
    let tracker = Arc::new(FakeTracker::new().with_ticket(ticket("ICU-7", "Open", "Summary")));
    let checker = checker(strict_config(), &github, &tracker);

    let verdict = checker
        .evaluate(&pull_request("ICU-7: Something", None))
        .await
        .unwrap();

    assert!(!verdict.pass);
    assert!(verdict.description.contains("Open"));
}

#[tokio::test]
async fn test_hundred_commits_fail_regardless_of_content() {
    let github = Arc::new(FakeGitHub::new().with_commits(commits_for("ICU-1", 100)));
    let tracker = Arc::new(FakeTracker::new().with_ticket(ticket("ICU-1", "Accepted", "S")));
    let checker = checker(strict_config(), &github, &tracker);

    let verdict = checker
        .evaluate(&pull_request("ICU-1 Big change", None))
        .await
        .unwrap();

    assert!(!verdict.pass);
    assert!(verdict.description.contains("please rebase and squash"));
}

#[tokio::test]
async fn test_maint_merge_waives_commit_mismatch() {
    let github =
        Arc::new(FakeGitHub::new().with_commits(vec![commit("9999999aaaa", "ICU-2 Other fix")]));
    let tracker = Arc::new(FakeTracker::new().with_ticket(ticket("ICU-1", "Accepted", "Merge")));
    let checker = checker(strict_config(), &github, &tracker);

    let verdict = checker
        .evaluate(&maint_pull_request("ICU-1 Merge maint/maint-72 to main"))
        .await
        .unwrap();

    assert!(verdict.pass);
    assert!(verdict.is_maint_merge);
}

#[tokio::test]
async fn test_tracker_failure_fails_the_evaluation() {
    let github = Arc::new(FakeGitHub::new().with_commits(commits_for("ICU-1", 1)));
    let tracker = Arc::new(FakeTracker::new().failing_with_status(503));
    let checker = checker(strict_config(), &github, &tracker);

    let result = checker.evaluate(&pull_request("ICU-1 Title", None)).await;

    assert!(matches!(
        result,
        Err(CheckerError::Tracker(jira_client::Error::Status { status: 503 }))
    ));
}

#[tokio::test]
async fn test_commit_listing_failure_fails_the_evaluation() {
    let github = Arc::new(FakeGitHub::new().failing_with_status(500));
    let tracker = Arc::new(FakeTracker::new().with_ticket(ticket("ICU-1", "Accepted", "S")));
    let checker = checker(strict_config(), &github, &tracker);

    let result = checker.evaluate(&pull_request("ICU-1 Title", None)).await;

    assert!(matches!(result, Err(CheckerError::GitHub(_))));
}

#[tokio::test]
async fn test_fetch_pull_request_not_found() {
    let github = Arc::new(FakeGitHub::new());
    let tracker = Arc::new(FakeTracker::new());
    let checker = checker(strict_config(), &github, &tracker);

    let result = checker.fetch_pull_request(OWNER, REPO, 5).await;

    assert!(result.unwrap_err().is_not_found());
}

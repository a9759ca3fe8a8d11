use super::*;
use serde_json::json;

fn pull_request_json(head_repo: serde_json::Value) -> serde_json::Value {
    json!({
        "number": 42,
        "title": "ICU-20001 Update the data",
        "body": "Some description\nALLOW_MANY_COMMITS=true",
        "state": "open",
        "html_url": "https://github.com/unicode-org/icu/pull/42",
        "base": {
            "ref": "main",
            "sha": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            "label": "unicode-org:main",
            "repo": {
                "id": 1,
                "name": "icu",
                "full_name": "unicode-org/icu",
                "owner": { "login": "unicode-org", "id": 7 }
            }
        },
        "head": {
            "ref": "maint/maint-72",
            "sha": "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb",
            "repo": head_repo
        }
    })
}

#[test]
fn test_pull_request_deserializes_github_payload() {
    let pr: PullRequest = serde_json::from_value(pull_request_json(json!({
        "name": "icu",
        "full_name": "unicode-org/icu",
        "owner": { "login": "unicode-org" }
    })))
    .unwrap();

    assert_eq!(pr.number, 42);
    assert_eq!(pr.state, PullRequestState::Open);
    assert_eq!(pr.base.ref_name, "main");
    assert_eq!(pr.head.ref_name, "maint/maint-72");
    assert_eq!(pr.owner(), "unicode-org");
    assert_eq!(pr.repo(), "icu");
    assert!(pr.is_open());
    assert_eq!(
        pr.head.repo.as_ref().map(|r| r.full_name.as_str()),
        Some("unicode-org/icu")
    );
}

#[test]
fn test_pull_request_with_deleted_fork_has_no_head_repo() {
    let pr: PullRequest = serde_json::from_value(pull_request_json(json!(null))).unwrap();

    assert!(pr.head.repo.is_none());
}

#[test]
fn test_pull_request_body_text_defaults_to_empty() {
    let mut value = pull_request_json(json!(null));
    value["body"] = json!(null);
    let pr: PullRequest = serde_json::from_value(value).unwrap();

    assert_eq!(pr.body_text(), "");
}

#[test]
fn test_short_sha_abbreviates_to_seven_characters() {
    let commit = CommitInfo {
        sha: "0123456789abcdef".to_string(),
        commit: CommitDetail {
            message: "ICU-1 message".to_string(),
        },
    };

    assert_eq!(commit.short_sha(), "0123456");
    assert_eq!(short_sha("abc"), "abc");
}

#[test]
fn test_commit_comparison_deserializes_files() {
    let comparison: CommitComparison = serde_json::from_value(json!({
        "status": "diverged",
        "ahead_by": 1,
        "behind_by": 2,
        "files": [
            { "filename": "a.txt", "sha": "1", "status": "modified" },
            { "sha": "2" }
        ]
    }))
    .unwrap();

    assert_eq!(comparison.status, CompareStatus::Diverged);
    assert_eq!(comparison.files.len(), 2);
    assert_eq!(comparison.files[0].filename.as_deref(), Some("a.txt"));
    assert!(comparison.files[1].filename.is_none());
}

#[test]
fn test_commit_comparison_without_files_defaults_to_empty() {
    let comparison: CommitComparison =
        serde_json::from_value(json!({ "status": "identical" })).unwrap();

    assert_eq!(comparison.status, CompareStatus::Identical);
    assert!(comparison.files.is_empty());
}

#[test]
fn test_commit_status_serialization_skips_missing_target_url() {
    let status = CommitStatus {
        state: StatusState::from_pass(false),
        target_url: None,
        description: "No commits found on PR".to_string(),
        context: "single-commit".to_string(),
    };

    let value = serde_json::to_value(&status).unwrap();

    assert_eq!(value["state"], "failure");
    assert_eq!(value["context"], "single-commit");
    assert!(value.get("target_url").is_none());
}

//! Tests for routes module

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use test_utils::{FakeGitHub, FakeTracker};
use tower::ServiceExt;

use crate::test_support::TestApp;

fn router() -> Router {
    create_router(TestApp::new(FakeGitHub::new(), FakeGitHub::new(), FakeTracker::new()).state)
}

#[tokio::test]
async fn test_health_route() {
    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = router()
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hook_only_accepts_post() {
    let response = router()
        .oneshot(Request::builder().uri("/hook").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_non_numeric_pull_number_is_rejected() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/info/unicode-org/icu/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_partial_info_path_is_404_without_sign_in() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/info/unicode-org/icu")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_squash_route_still_requires_sign_in() {
    let response = router()
        .oneshot(
            Request::builder()
                .uri("/squash/unicode-org/icu/42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

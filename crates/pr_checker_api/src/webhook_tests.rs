//! Tests for webhook module

use super::*;
use axum::http::HeaderValue;

const SECRET: &[u8] = b"It's a Secret to Everybody";
const BODY: &[u8] = b"Hello, World!";

// Sample delivery from the GitHub webhook documentation
const SHA256_SIGNATURE: &str =
    "sha256=757107ea0eb2509fc211221cce984b8a37570b6d7586c22c46f4379c8b043e17";

fn sha1_signature(body: &[u8]) -> String {
    let mut mac = <Hmac<Sha1> as hmac::digest::KeyInit>::new_from_slice(SECRET).unwrap();
    mac.update(body);
    format!("sha1={}", hex::encode(mac.finalize().into_bytes()))
}

fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        headers.insert(*name, HeaderValue::from_str(value).unwrap());
    }
    headers
}

#[test]
fn test_valid_sha256_signature() {
    let headers = headers(&[(SIGNATURE_256_HEADER, SHA256_SIGNATURE)]);

    assert!(verify_signature(&headers, BODY, SECRET));
}

#[test]
fn test_tampered_body_is_rejected() {
    let headers = headers(&[(SIGNATURE_256_HEADER, SHA256_SIGNATURE)]);

    assert!(!verify_signature(&headers, b"Hello, World?", SECRET));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let headers = headers(&[(SIGNATURE_256_HEADER, SHA256_SIGNATURE)]);

    assert!(!verify_signature(&headers, BODY, b"another secret"));
}

#[test]
fn test_sha1_signature_is_used_without_sha256() {
    let signature = sha1_signature(BODY);
    let headers = headers(&[(SIGNATURE_HEADER, &signature)]);

    assert!(verify_signature(&headers, BODY, SECRET));
}

#[test]
fn test_sha256_takes_precedence_over_sha1() {
    let signature = sha1_signature(BODY);
    let headers = headers(&[
        (SIGNATURE_256_HEADER, "sha256=00"),
        (SIGNATURE_HEADER, &signature),
    ]);

    assert!(!verify_signature(&headers, BODY, SECRET));
}

#[test]
fn test_missing_or_malformed_signature_is_rejected() {
    assert!(!verify_signature(&HeaderMap::new(), BODY, SECRET));
    assert!(!verify_signature(
        &headers(&[(SIGNATURE_256_HEADER, "757107ea0eb2509fc211")]),
        BODY,
        SECRET
    ));
    assert!(!verify_signature(
        &headers(&[(SIGNATURE_256_HEADER, "sha256=not-hex")]),
        BODY,
        SECRET
    ));
}

#[test]
fn test_pushed_range_only_for_synchronize() {
    let payload: WebhookPayload = serde_json::from_str(
        r#"{ "action": "synchronize", "before": "aaa", "after": "bbb" }"#,
    )
    .unwrap();
    assert_eq!(payload.pushed_range(), Some(("aaa", "bbb")));

    let payload: WebhookPayload =
        serde_json::from_str(r#"{ "action": "edited", "before": "aaa", "after": "bbb" }"#)
            .unwrap();
    assert_eq!(payload.pushed_range(), None);

    let payload: WebhookPayload =
        serde_json::from_str(r#"{ "action": "synchronize", "after": "bbb" }"#).unwrap();
    assert_eq!(payload.pushed_range(), None);
}

#[test]
fn test_payload_without_pull_request() {
    let payload: WebhookPayload =
        serde_json::from_str(r#"{ "zen": "Keep it logically awesome.", "hook_id": 1 }"#).unwrap();

    assert!(payload.pull_request.is_none());
    assert!(payload.action.is_none());
}

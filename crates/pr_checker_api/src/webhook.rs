//! GitHub webhook payloads and signature verification.
//!
//! GitHub signs each delivery with the shared secret: `X-Hub-Signature-256` holds
//! `sha256=<hex HMAC-SHA256>` and the older `X-Hub-Signature` holds
//! `sha1=<hex HMAC-SHA1>`. The SHA-256 signature is preferred when present.

use axum::http::HeaderMap;
use github_client::models::PullRequest;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha1::Sha1;
use sha2::Sha256;

#[cfg(test)]
#[path = "webhook_tests.rs"]
mod tests;

pub const SIGNATURE_256_HEADER: &str = "x-hub-signature-256";
pub const SIGNATURE_HEADER: &str = "x-hub-signature";

/// The parts of a `pull_request` event the service reads.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub action: Option<String>,

    /// Branch tip before a `synchronize` push
    #[serde(default)]
    pub before: Option<String>,

    /// Branch tip after a `synchronize` push
    #[serde(default)]
    pub after: Option<String>,

    #[serde(default)]
    pub pull_request: Option<PullRequest>,
}

impl WebhookPayload {
    /// The old and new branch tips if this event is a push to the branch.
    pub fn pushed_range(&self) -> Option<(&str, &str)> {
        if self.action.as_deref() != Some("synchronize") {
            return None;
        }
        Some((self.before.as_deref()?, self.after.as_deref()?))
    }
}

/// Returns `true` when the request carries a valid signature for `body`.
pub fn verify_signature(headers: &HeaderMap, body: &[u8], secret: &[u8]) -> bool {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    if let Some(signature) = header(SIGNATURE_256_HEADER) {
        return match signature.strip_prefix("sha256=") {
            Some(hex_part) => verify_hmac::<Hmac<Sha256>>(hex_part, body, secret),
            None => false,
        };
    }

    match header(SIGNATURE_HEADER).and_then(|s| s.strip_prefix("sha1=")) {
        Some(hex_part) => verify_hmac::<Hmac<Sha1>>(hex_part, body, secret),
        None => false,
    }
}

fn verify_hmac<M: Mac + hmac::digest::KeyInit>(hex_part: &str, body: &[u8], secret: &[u8]) -> bool {
    let Ok(received) = hex::decode(hex_part) else {
        return false;
    };
    let Ok(mut mac) = <M as hmac::digest::KeyInit>::new_from_slice(secret) else {
        return false;
    };
    mac.update(body);

    // Constant-time comparison
    mac.verify_slice(&received).is_ok()
}

//! Request middleware
//!
//! This module provides middleware for:
//! - Bearer token extraction for endpoints acting as the signed-in user
//! - Request tracing with a request ID

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use secrecy::SecretString;

use crate::{errors::ApiError, AppState};

#[cfg(test)]
#[path = "middleware_tests.rs"]
mod tests;

/// The GitHub token of the signed-in user, attached to the request extensions by
/// [`user_auth_middleware`].
#[derive(Debug, Clone)]
pub struct UserToken(pub SecretString);

/// Requires a `Bearer` token in the Authorization header.
///
/// The token is not validated here; GitHub rejects it on first use, which the
/// handlers report as [`ApiError::AuthenticationRequired`].
///
/// Returns 401 with the sign-in URL if the header is missing or malformed.
pub async fn user_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or_else(|| ApiError::AuthenticationRequired {
            login_url: state.login_url(),
        })?;

    request
        .extensions_mut()
        .insert(UserToken(SecretString::from(token)));

    Ok(next.run(request).await)
}

/// Extract Bearer token from Authorization header.
///
/// Expected format: "Bearer <token>"
fn extract_bearer_token(auth_header: &str) -> Option<String> {
    let parts: Vec<&str> = auth_header.split_whitespace().collect();

    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => Some(token.to_string()),
        _ => None,
    }
}

/// Request tracing middleware.
///
/// Adds request ID and logging context for observability.
pub async fn tracing_middleware(request: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();

    tracing::info!(
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
        "Request started"
    );

    let response = next.run(request).await;

    tracing::info!(
        request_id = %request_id,
        status = %response.status(),
        "Request completed"
    );

    response
}

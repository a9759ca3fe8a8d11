//! HTTP request handlers
//!
//! Each handler:
//! 1. Extracts HTTP request data (path params, query params, body)
//! 2. Calls the checker with a bot or user GitHub client
//! 3. Translates the result to an HTTP response
//!
//! Failing checks are part of a successful response. Only collaborator failures
//! and invalid requests produce an [`ApiError`].

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Extension, Json,
};
use pr_checker_core::{squash, CheckerError};
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::{
    errors::ApiError,
    middleware::UserToken,
    models::{request::*, response::*},
    webhook::{verify_signature, WebhookPayload},
    AppState,
};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// GET /info/:owner/:repo/:pull_number
///
/// Evaluates a pull request and returns the verdict with related links.
pub async fn pull_request_info(
    State(state): State<AppState>,
    Path(params): Path<PullRequestPath>,
) -> Result<Json<InfoResponse>, ApiError> {
    let checker = state.checker().await?;
    let pull_request = checker
        .fetch_pull_request(&params.owner, &params.repo, params.pull_number)
        .await?;
    let verdict = checker.evaluate(&pull_request).await?;

    let jira_url = verdict
        .issue_key
        .as_deref()
        .and_then(|key| state.browse_url(key));

    Ok(Json(InfoResponse {
        jira_url,
        squash_url: state.config.view_url(
            "squash",
            &params.owner,
            &params.repo,
            params.pull_number,
        ),
        instructions_url: state.config.instructions_url.clone(),
        pull_request,
        verdict,
    }))
}

/// POST /touch/:owner/:repo/:pull_number
///
/// Evaluates a pull request and publishes the verdict.
pub async fn touch_pull_request(
    State(state): State<AppState>,
    Path(params): Path<PullRequestPath>,
) -> Result<StatusCode, ApiError> {
    let checker = state.checker().await?;
    let pull_request = checker
        .fetch_pull_request(&params.owner, &params.repo, params.pull_number)
        .await?;
    let verdict = checker.evaluate(&pull_request).await?;
    checker.publish(&pull_request, &verdict).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /hook
///
/// Receives GitHub webhook deliveries. Pull request events are evaluated and
/// published; a `synchronize` event is first checked for a force-push. Other
/// deliveries are acknowledged and ignored.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    if let Some(secret) = &state.webhook_secret {
        if !verify_signature(&headers, &body, secret.expose_secret().as_bytes()) {
            warn!("Ignoring webhook request with bad signature");
            return Err(ApiError::InvalidSignature);
        }
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("Invalid webhook payload: {}", e)))?;

    let Some(pull_request) = &payload.pull_request else {
        info!(action = ?payload.action, "Ignoring webhook without a pull request");
        return Ok(StatusCode::NO_CONTENT);
    };

    let checker = state.checker().await?;
    if let Some((before, after)) = payload.pushed_range() {
        checker
            .reconcile_force_push(before, after, pull_request)
            .await?;
    }

    let verdict = checker.evaluate(pull_request).await?;
    checker.publish(pull_request, &verdict).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /squash/:owner/:repo/:pull_number
///
/// Shows what a squash would do. Requires a user token.
pub async fn squash_preview(
    State(state): State<AppState>,
    Path(params): Path<PullRequestPath>,
    Extension(_user): Extension<UserToken>,
) -> Result<Json<SquashPreviewResponse>, ApiError> {
    let checker = state.checker().await?;
    let pull_request = checker
        .fetch_pull_request(&params.owner, &params.repo, params.pull_number)
        .await?;
    let verdict = checker.evaluate(&pull_request).await?;

    Ok(Json(SquashPreviewResponse {
        title: pull_request.title.clone(),
        description: pull_request.body_text().to_string(),
        pull_request,
        verdict,
    }))
}

/// POST /do-squash
///
/// Replaces the pull request branch with a single commit, acting as the user.
pub async fn do_squash(
    State(state): State<AppState>,
    Extension(user): Extension<UserToken>,
    Json(request): Json<DoSquashRequest>,
) -> Result<Json<DoSquashResponse>, ApiError> {
    if !request.confirm {
        return Err(ApiError::validation(
            "confirm",
            "Please check the confirmation box!",
        ));
    }

    let checker = state.checker().await?;
    let pull_request = checker
        .fetch_pull_request(&request.owner, &request.repo, request.pull_number)
        .await?;

    let git = state.clients.user_client(user.0.expose_secret())?;
    let sha = squash(
        git.as_ref(),
        &pull_request,
        &request.squash_request(),
        state.config.committer.as_ref(),
    )
    .await
    .map_err(|e| match e {
        CheckerError::AuthenticationRequired => ApiError::AuthenticationRequired {
            login_url: state.login_url(),
        },
        other => ApiError::from(other),
    })?;

    Ok(Json(DoSquashResponse {
        sha,
        info_url: state.config.view_url(
            "info",
            &request.owner,
            &request.repo,
            request.pull_number,
        ),
    }))
}

/// GET /github-auth
///
/// OAuth callback. Exchanges the authorization code for a user token.
pub async fn github_auth_callback(
    State(state): State<AppState>,
    Query(query): Query<GitHubAuthQuery>,
) -> Result<Json<UserTokenResponse>, ApiError> {
    let oauth = state.oauth.as_ref().ok_or_else(|| {
        ApiError::from(auth_handler::AuthError::NotConfigured(
            "GITHUB_OAUTH_CLIENT_ID".to_string(),
        ))
    })?;
    let code = query
        .code
        .as_deref()
        .ok_or_else(|| ApiError::bad_request("Missing code parameter"))?;

    let token = oauth.exchange_code(code, query.state.as_deref()).await?;

    Ok(Json(UserTokenResponse {
        access_token: token.expose_secret().to_string(),
        token_type: "bearer".to_string(),
    }))
}

/// GET /health
///
/// Returns service health status with version and timestamp.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

//! HTTP routing configuration
//!
//! # Route Structure
//!
//! - GET    /health - Health check
//! - GET    /info/:owner/:repo/:pull_number - Verdict and links for a pull request
//! - POST   /touch/:owner/:repo/:pull_number - Re-publish the verdict
//! - POST   /hook - GitHub webhook receiver
//! - GET    /github-auth - OAuth callback
//! - GET    /squash/:owner/:repo/:pull_number - Squash preview (user token)
//! - POST   /do-squash - Squash a pull request branch (user token)

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

use crate::{handlers, middleware as api_middleware, AppState};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Create the complete router with all routes configured.
///
/// This function sets up:
/// - All endpoint routes
/// - User token middleware on the squash routes
/// - Request tracing
/// - Timeout handling
pub fn create_router(state: AppState) -> Router {
    // Configure request tracing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new())
        .on_response(DefaultOnResponse::new());

    // Configure request timeout (30 seconds)
    let timeout_layer = TimeoutLayer::new(Duration::from_secs(30));

    // Routes acting as the signed-in user
    let user_routes = Router::new()
        .route(
            "/squash/:owner/:repo/:pull_number",
            get(handlers::squash_preview),
        )
        .route("/do-squash", post(handlers::do_squash))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api_middleware::user_auth_middleware,
        ));

    Router::new()
        .merge(user_routes)
        .route("/health", get(handlers::health_check))
        .route(
            "/info/:owner/:repo/:pull_number",
            get(handlers::pull_request_info),
        )
        .route(
            "/touch/:owner/:repo/:pull_number",
            post(handlers::touch_pull_request),
        )
        .route("/hook", post(handlers::receive_webhook))
        .route("/github-auth", get(handlers::github_auth_callback))
        .layer(middleware::from_fn(api_middleware::tracing_middleware))
        .layer(timeout_layer)
        .layer(trace_layer)
        .with_state(state)
}

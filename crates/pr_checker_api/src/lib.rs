//! PR Checker HTTP service
//!
//! This crate exposes the checker over HTTP: a GitHub webhook receiver, endpoints
//! to inspect and re-publish the verdict for a pull request, and the squash flow
//! that acts with the credentials of a signed-in user.
//!
//! # Architecture
//!
//! This crate exists in the HTTP layer and handles:
//! - HTTP request/response translation
//! - Webhook signature verification
//! - User token extraction for the squash flow
//! - Error mapping from domain to HTTP
//! - Routing and server configuration
//!
//! The checking rules themselves live in `pr_checker_core`.

use std::sync::Arc;

use jira_client::TicketClient;
use pr_checker_core::{CheckerConfig, CheckerResult, ClientProvider, PullRequestChecker};
use secrecy::SecretString;

use auth_handler::UserAuthenticationService;

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod webhook;

#[cfg(test)]
mod test_support;

// Re-export key types for convenience
pub use errors::{ApiError, ErrorResponse};
pub use models::{request, response};
pub use server::{ApiConfig, ApiServer};

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Checker rules and public URLs
    pub config: Arc<CheckerConfig>,

    /// Issue tracker lookups
    pub tracker: Arc<dyn TicketClient>,

    /// Tracker host used for ticket links
    pub tracker_host: Option<String>,

    /// Source of bot and user GitHub clients
    pub clients: Arc<dyn ClientProvider>,

    /// OAuth sign-in for the squash flow, `None` when not configured
    pub oauth: Option<Arc<dyn UserAuthenticationService>>,

    /// Shared secret for webhook signatures, `None` to accept unsigned payloads
    pub webhook_secret: Option<SecretString>,
}

impl AppState {
    /// Creates a checker acting as the bot.
    pub async fn checker(&self) -> CheckerResult<PullRequestChecker> {
        let github = self.clients.bot_client().await?;
        Ok(PullRequestChecker::new(
            self.config.clone(),
            github,
            self.tracker.clone(),
        ))
    }

    /// A fresh sign-in URL, if OAuth is configured.
    pub fn login_url(&self) -> Option<String> {
        self.oauth.as_ref().map(|oauth| oauth.login_url().url)
    }

    /// The tracker link for a ticket.
    pub fn browse_url(&self, issue_key: &str) -> Option<String> {
        self.tracker_host
            .as_deref()
            .map(|host| jira_client::browse_url(host, issue_key))
    }
}

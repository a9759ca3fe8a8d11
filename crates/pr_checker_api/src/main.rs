//! PR Checker API Server
//!
//! Main binary for running the API server in production or development.
//!
//! # Environment Variables
//!
//! A `.env` file in the working directory is loaded first.
//!
//! - `API_PORT`: Port to listen on (default: 8080)
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `RUST_LOG`: Log level (default: info)
//! - `JIRA_URL`: Issue tracker host (required)
//! - `GITHUB_TOKEN`, or `GITHUB_APP_ID` with `GITHUB_APP_INSTALLATION_ID` and a
//!   private key: bot credentials (required)
//! - `GITHUB_WEBHOOK_SECRET`: Webhook signature secret
//! - `GITHUB_OAUTH_CLIENT_ID`, `GITHUB_OAUTH_CLIENT_SECRET`: Squash sign-in
//!
//! The checker settings are described on `pr_checker_core::CheckerConfig`.

use std::{env, sync::Arc};

use auth_handler::{AuthError, GitHubOAuthService, UserAuthenticationService};
use pr_checker_api::{ApiConfig, ApiServer, AppState};
use pr_checker_core::{BotCredentials, CheckerConfig, GitHubClientProvider, TrackerSettings};
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let lookup = |key: &str| env::var(key).ok().filter(|v| !v.trim().is_empty());

    let config = ApiConfig::from_lookup(lookup)?;
    let checker_config = CheckerConfig::from_env()?;
    let tracker_settings = TrackerSettings::from_env()?;
    let tracker = tracker_settings.create_client()?;
    let provider = GitHubClientProvider::new(BotCredentials::from_env()?);

    let oauth: Option<Arc<dyn UserAuthenticationService>> = match GitHubOAuthService::from_env() {
        Ok(service) => Some(Arc::new(service)),
        Err(AuthError::NotConfigured(key)) => {
            tracing::warn!("{} is not set, squashing is disabled", key);
            None
        }
        Err(e) => return Err(e.into()),
    };

    let webhook_secret = lookup("GITHUB_WEBHOOK_SECRET").map(SecretString::from);
    if webhook_secret.is_none() {
        tracing::warn!("GITHUB_WEBHOOK_SECRET is not set, webhook signatures are not checked");
    }

    let state = AppState {
        config: Arc::new(checker_config),
        tracker: Arc::new(tracker),
        tracker_host: tracker_settings.host.clone(),
        clients: Arc::new(provider),
        oauth,
        webhook_secret,
    };
    let server = ApiServer::new(config, state);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting PR Checker API server"
    );

    // Start server with graceful shutdown
    server.serve().await
}

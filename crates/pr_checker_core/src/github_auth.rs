//! GitHub authentication for the bot and for signed-in users.
//!
//! ## Bot
//!
//! The bot reads pull requests and publishes statuses and comments. It
//! authenticates either with a personal access token (`GITHUB_TOKEN`) or as a
//! GitHub App installation:
//! 1. A JWT signed with the app private key authenticates as the app
//! 2. The app exchanges the JWT for an installation access token
//! 3. A client authenticated with the installation token performs the API calls
//!
//! Installation tokens expire after an hour, so the installation client is cached
//! and replaced once it is older than [`INSTALLATION_CLIENT_LIFETIME`].
//!
//! ## Users
//!
//! Squashing rewrites a branch the bot may not be allowed to push to, so it runs
//! with the OAuth token of the signed-in user instead.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::Engine;
use github_client::{
    create_app_client, create_installation_client, create_token_client, GitDataClient,
    GitHubClient, PullRequestClient,
};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::errors::{CheckerError, CheckerResult};

#[cfg(test)]
#[path = "github_auth_tests.rs"]
mod tests;

/// How long an installation client is reused. Installation tokens are valid for
/// an hour.
pub const INSTALLATION_CLIENT_LIFETIME: Duration = Duration::from_secs(50 * 60);

/// Credentials the bot authenticates with.
#[derive(Debug, Clone)]
pub enum BotCredentials {
    /// A personal access token.
    Token(SecretString),
    /// A GitHub App installation.
    App {
        app_id: u64,
        installation_id: u64,
        private_key: SecretString,
    },
}

impl BotCredentials {
    pub fn from_env() -> CheckerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the bot credentials through a key lookup function.
    ///
    /// `GITHUB_TOKEN` takes precedence. Otherwise `GITHUB_APP_ID` and
    /// `GITHUB_APP_INSTALLATION_ID` are required, together with the private key
    /// either as a file (`GITHUB_APP_PEM_FILE`) or as base64 encoded PEM
    /// (`GITHUB_APP_PEM_BLOB`).
    ///
    /// # Errors
    ///
    /// Returns `CheckerError::Configuration` if neither form of credentials is
    /// complete and valid.
    pub fn from_lookup<F>(lookup: F) -> CheckerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = value("GITHUB_TOKEN") {
            return Ok(Self::Token(SecretString::from(token)));
        }

        let Some(app_id) = value("GITHUB_APP_ID") else {
            return Err(CheckerError::configuration(
                "GITHUB_TOKEN",
                "either GITHUB_TOKEN or GITHUB_APP_ID must be set",
            ));
        };
        let app_id = parse_id("GITHUB_APP_ID", &app_id)?;

        let installation_id = value("GITHUB_APP_INSTALLATION_ID").ok_or_else(|| {
            CheckerError::configuration("GITHUB_APP_INSTALLATION_ID", "not set")
        })?;
        let installation_id = parse_id("GITHUB_APP_INSTALLATION_ID", &installation_id)?;

        let private_key = match (value("GITHUB_APP_PEM_FILE"), value("GITHUB_APP_PEM_BLOB")) {
            (Some(path), _) => read_pem_file(Path::new(&path))?,
            (None, Some(blob)) => decode_pem_blob(&blob)?,
            (None, None) => {
                return Err(CheckerError::configuration(
                    "GITHUB_APP_PEM_FILE",
                    "either GITHUB_APP_PEM_FILE or GITHUB_APP_PEM_BLOB must be set",
                ))
            }
        };

        Ok(Self::App {
            app_id,
            installation_id,
            private_key: SecretString::from(private_key),
        })
    }
}

fn parse_id(key: &str, value: &str) -> CheckerResult<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|e| CheckerError::configuration(key, e.to_string()))
}

fn read_pem_file(path: &Path) -> CheckerResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        CheckerError::configuration(
            "GITHUB_APP_PEM_FILE",
            format!("cannot read {}: {}", path.display(), e),
        )
    })
}

fn decode_pem_blob(blob: &str) -> CheckerResult<String> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(blob.trim())
        .map_err(|e| CheckerError::configuration("GITHUB_APP_PEM_BLOB", e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| CheckerError::configuration("GITHUB_APP_PEM_BLOB", e.to_string()))
}

/// Hands out authenticated GitHub clients.
#[async_trait]
pub trait ClientProvider: Send + Sync {
    /// A client acting as the bot.
    async fn bot_client(&self) -> CheckerResult<Arc<dyn PullRequestClient>>;

    /// A client acting as the user owning `token`.
    fn user_client(&self, token: &str) -> CheckerResult<Arc<dyn GitDataClient>>;
}

struct CachedClient {
    client: Arc<GitHubClient>,
    created: Instant,
}

/// [`ClientProvider`] backed by the GitHub REST API.
pub struct GitHubClientProvider {
    credentials: BotCredentials,
    cached: Mutex<Option<CachedClient>>,
}

impl GitHubClientProvider {
    pub fn new(credentials: BotCredentials) -> Self {
        Self {
            credentials,
            cached: Mutex::new(None),
        }
    }

    async fn create_bot_client(&self) -> CheckerResult<GitHubClient> {
        let octocrab = match &self.credentials {
            BotCredentials::Token(token) => create_token_client(token.expose_secret())?,
            BotCredentials::App {
                app_id,
                installation_id,
                private_key,
            } => {
                info!(app_id, installation_id, "Creating GitHub App installation client");
                let app_client = create_app_client(*app_id, private_key.expose_secret())
                    .await
                    .map_err(|e| {
                        error!(app_id, error = %e, "Failed to create GitHub App client");
                        e
                    })?;
                create_installation_client(&app_client, *installation_id).await?
            }
        };
        Ok(GitHubClient::new(octocrab))
    }
}

#[async_trait]
impl ClientProvider for GitHubClientProvider {
    async fn bot_client(&self) -> CheckerResult<Arc<dyn PullRequestClient>> {
        let mut cached = self.cached.lock().await;
        if let Some(entry) = cached.as_ref() {
            if entry.created.elapsed() < INSTALLATION_CLIENT_LIFETIME {
                return Ok(entry.client.clone());
            }
            debug!("Cached bot client expired");
        }

        let client = Arc::new(self.create_bot_client().await?);
        *cached = Some(CachedClient {
            client: client.clone(),
            created: Instant::now(),
        });
        Ok(client)
    }

    fn user_client(&self, token: &str) -> CheckerResult<Arc<dyn GitDataClient>> {
        let octocrab = create_token_client(token)?;
        Ok(Arc::new(GitHubClient::new(octocrab)))
    }
}

//! User authentication for the squash flow.
//!
//! Squashing rewrites the pull request branch, which only the pull request author
//! or a maintainer may do. The service therefore acts with the user's own GitHub
//! credentials, obtained through the GitHub OAuth web flow:
//! 1. The user is sent to the URL from [`UserAuthenticationService::login_url`]
//! 2. GitHub redirects back with a `code` and the `state` from step 1
//! 3. [`UserAuthenticationService::exchange_code`] checks the state and trades the
//!    code for an access token
//!
//! The state is signed and carries its own expiry, so no server-side session is
//! needed to check it. Holding on to the token between requests is left to the
//! caller.

use async_trait::async_trait;
use secrecy::SecretString;

mod github_auth_service;

pub use github_auth_service::{
    GitHubOAuthService, DEFAULT_GITHUB_URL, OAUTH_SCOPE, STATE_LIFETIME_SECS,
};

/// Result type for authentication operations
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Errors that can occur during authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// GitHub rejected the authorization code, e.g. because it expired or was
    /// already used.
    #[error("Invalid credentials provided")]
    InvalidCredentials,

    /// The callback `state` is missing, was not issued by this service or has
    /// expired.
    #[error("Invalid or expired OAuth state")]
    InvalidState,

    #[error("OAuth is not configured: {0} is not set")]
    NotConfigured(String),

    #[error("GitHub API error: {0}")]
    GitHubError(String),
}

/// Where to send a user to sign in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUrl {
    pub url: String,
    /// Signed value GitHub echoes back to the callback
    pub state: String,
}

/// User authentication service interface
#[async_trait]
pub trait UserAuthenticationService: Send + Sync {
    /// Builds a fresh sign-in URL.
    fn login_url(&self) -> LoginUrl;

    /// Exchanges an authorization code for a user access token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidState` if `state` is not one this service issued
    /// and is still valid, `AuthError::InvalidCredentials` if GitHub rejects the
    /// code and
    /// `AuthError::GitHubError` if GitHub cannot be reached or answers unexpectedly.
    async fn exchange_code(&self, code: &str, state: Option<&str>) -> AuthResult<SecretString>;
}

//! GitHub OAuth web flow implementation
//!
//! Provides the concrete implementation of `UserAuthenticationService` for GitHub
//! OAuth apps.

use crate::{AuthError, AuthResult, LoginUrl, UserAuthenticationService};
use async_trait::async_trait;
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::{debug, instrument, warn};
use url::Url;

#[cfg(test)]
#[path = "github_auth_service_tests.rs"]
mod tests;

pub const DEFAULT_GITHUB_URL: &str = "https://github.com";

/// Scope requested from users; enough to push to branches of public repositories.
pub const OAUTH_SCOPE: &str = "public_repo";

/// How long a sign-in state stays valid. GitHub authorization codes expire after
/// ten minutes as well.
pub const STATE_LIFETIME_SECS: i64 = 600;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    state: &'a str,
}

/// GitHub answers token requests with either a token or an error, both with
/// status 200.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// GitHub OAuth authentication service
///
/// # Examples
///
/// ```rust,no_run
/// use auth_handler::{GitHubOAuthService, UserAuthenticationService};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = GitHubOAuthService::from_env()?;
///
/// let login = service.login_url();
/// println!("Sign in at {}", login.url);
///
/// // Later, in the callback handler
/// let token = service.exchange_code("code-from-callback", Some(&login.state)).await?;
/// # Ok(())
/// # }
/// ```
pub struct GitHubOAuthService {
    http: reqwest::Client,
    base_url: Url,
    client_id: String,
    client_secret: SecretString,
}

impl GitHubOAuthService {
    /// Create a service for an OAuth app on github.com
    pub fn new(client_id: String, client_secret: SecretString) -> Self {
        let base_url = Url::parse(DEFAULT_GITHUB_URL).expect("default GitHub URL is valid");
        Self::with_base_url(base_url, client_id, client_secret)
    }

    /// Create a service for an explicit GitHub base URL
    pub fn with_base_url(base_url: Url, client_id: String, client_secret: SecretString) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            client_id,
            client_secret,
        }
    }

    pub fn from_env() -> AuthResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `GITHUB_OAUTH_CLIENT_ID` and `GITHUB_OAUTH_CLIENT_SECRET`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotConfigured` naming the first missing key.
    pub fn from_lookup<F>(lookup: F) -> AuthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AuthError::NotConfigured(key.to_string()))
        };
        let client_id = value("GITHUB_OAUTH_CLIENT_ID")?;
        let client_secret = value("GITHUB_OAUTH_CLIENT_SECRET")?;
        Ok(Self::new(client_id, SecretString::from(client_secret)))
    }

    /// Signs `nonce.expires_at` with the client secret.
    ///
    /// The state has the form `nonce.expires_at.signature`.
    fn signed_state(&self, nonce: &str, expires_at: i64) -> String {
        let payload = format!("{}.{}", nonce, expires_at);
        let mut mac = self.state_mac();
        mac.update(payload.as_bytes());
        format!("{}.{}", payload, hex::encode(mac.finalize().into_bytes()))
    }

    /// Checks that `state` was signed by this service and has not expired at `now`
    /// (seconds since the epoch).
    fn verify_state(&self, state: &str, now: i64) -> AuthResult<()> {
        let mut parts = state.splitn(3, '.');
        let (Some(nonce), Some(expires_at), Some(signature)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(AuthError::InvalidState);
        };

        let signature = hex::decode(signature).map_err(|_| AuthError::InvalidState)?;
        let mut mac = self.state_mac();
        mac.update(format!("{}.{}", nonce, expires_at).as_bytes());
        mac.verify_slice(&signature).map_err(|_| AuthError::InvalidState)?;

        let expires_at: i64 = expires_at.parse().map_err(|_| AuthError::InvalidState)?;
        if now > expires_at {
            return Err(AuthError::InvalidState);
        }
        Ok(())
    }

    fn state_mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(self.client_secret.expose_secret().as_bytes())
            .expect("HMAC accepts keys of any length")
    }

    fn endpoint(&self, path: &str) -> AuthResult<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AuthError::GitHubError(e.to_string()))
    }
}

#[async_trait]
impl UserAuthenticationService for GitHubOAuthService {
    fn login_url(&self) -> LoginUrl {
        let nonce = uuid::Uuid::new_v4().simple().to_string();
        let state = self.signed_state(&nonce, Utc::now().timestamp() + STATE_LIFETIME_SECS);
        let mut url = self.base_url.clone();
        url.set_path("/login/oauth/authorize");
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("scope", OAUTH_SCOPE)
            .append_pair("state", &state);
        LoginUrl {
            url: url.to_string(),
            state,
        }
    }

    #[instrument(skip(self, code, state))]
    async fn exchange_code(&self, code: &str, state: Option<&str>) -> AuthResult<SecretString> {
        let state = state.ok_or(AuthError::InvalidState)?;
        if let Err(e) = self.verify_state(state, Utc::now().timestamp()) {
            warn!("OAuth callback state was not issued by this service or has expired");
            return Err(e);
        }

        let url = self.endpoint("/login/oauth/access_token")?;
        let request = TokenRequest {
            client_id: &self.client_id,
            client_secret: self.client_secret.expose_secret(),
            code,
            state,
        };

        let response = self
            .http
            .post(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AuthError::GitHubError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "OAuth token exchange failed");
            return Err(AuthError::GitHubError(format!(
                "token exchange returned status {}",
                status.as_u16()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::GitHubError(e.to_string()))?;

        match (body.access_token, body.error) {
            (Some(token), _) if !token.is_empty() => {
                debug!("Exchanged authorization code for a user token");
                Ok(SecretString::from(token))
            }
            (_, Some(error)) => {
                warn!(
                    error = %error,
                    description = body.error_description.as_deref().unwrap_or_default(),
                    "GitHub rejected the authorization code"
                );
                Err(AuthError::InvalidCredentials)
            }
            _ => Err(AuthError::GitHubError(
                "token response has no access token".to_string(),
            )),
        }
    }
}

impl std::fmt::Debug for GitHubOAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubOAuthService")
            .field("base_url", &self.base_url.as_str())
            .field("client_id", &self.client_id)
            .field("client_secret", &"<REDACTED>")
            .finish()
    }
}

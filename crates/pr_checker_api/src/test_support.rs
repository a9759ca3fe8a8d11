//! Application state wired to in-memory collaborators.

use std::sync::Arc;

use async_trait::async_trait;
use auth_handler::{AuthError, AuthResult, LoginUrl, UserAuthenticationService};
use axum::{body::Body, http::Response};
use github_client::{GitDataClient, PullRequestClient};
use http_body_util::BodyExt;
use pr_checker_core::{CheckerConfig, CheckerResult, ClientProvider};
use secrecy::SecretString;
use test_utils::{FakeGitHub, FakeTracker};

use crate::AppState;

pub const LOGIN_URL: &str = "https://github.com/login/oauth/authorize?client_id=test";
pub const GOOD_CODE: &str = "good-code";
pub const USER_TOKEN: &str = "gho_user_token";
pub const LOGIN_STATE: &str = "state-1";

/// Hands out the bot and user fakes.
pub struct FakeClientProvider {
    pub bot: Arc<FakeGitHub>,
    pub user: Arc<FakeGitHub>,
}

#[async_trait]
impl ClientProvider for FakeClientProvider {
    async fn bot_client(&self) -> CheckerResult<Arc<dyn PullRequestClient>> {
        Ok(self.bot.clone())
    }

    fn user_client(&self, _token: &str) -> CheckerResult<Arc<dyn GitDataClient>> {
        Ok(self.user.clone())
    }
}

/// Accepts [`GOOD_CODE`] with [`LOGIN_STATE`] only.
pub struct FakeOAuth;

#[async_trait]
impl UserAuthenticationService for FakeOAuth {
    fn login_url(&self) -> LoginUrl {
        LoginUrl {
            url: LOGIN_URL.to_string(),
            state: LOGIN_STATE.to_string(),
        }
    }

    async fn exchange_code(&self, code: &str, state: Option<&str>) -> AuthResult<SecretString> {
        if state != Some(LOGIN_STATE) {
            Err(AuthError::InvalidState)
        } else if code == GOOD_CODE {
            Ok(SecretString::from(USER_TOKEN.to_string()))
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }
}

pub struct TestApp {
    pub state: AppState,
    pub bot: Arc<FakeGitHub>,
    pub user: Arc<FakeGitHub>,
}

impl TestApp {
    pub fn new(bot: FakeGitHub, user: FakeGitHub, tracker: FakeTracker) -> Self {
        let bot = Arc::new(bot);
        let user = Arc::new(user);
        let config = CheckerConfig::from_lookup(|key| {
            (key == "URL_PREFIX").then(|| "https://checker.example.com".to_string())
        })
        .unwrap();

        let state = AppState {
            config: Arc::new(config),
            tracker: Arc::new(tracker),
            tracker_host: Some("unicode-org.atlassian.net".to_string()),
            clients: Arc::new(FakeClientProvider {
                bot: bot.clone(),
                user: user.clone(),
            }),
            oauth: Some(Arc::new(FakeOAuth)),
            webhook_secret: None,
        };
        Self { state, bot, user }
    }

    pub fn with_webhook_secret(mut self, secret: &str) -> Self {
        self.state.webhook_secret = Some(SecretString::from(secret.to_string()));
        self
    }

    pub fn without_oauth(mut self) -> Self {
        self.state.oauth = None;
        self
    }
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

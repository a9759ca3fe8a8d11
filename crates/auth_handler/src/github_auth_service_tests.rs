use super::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn service_for(mock_server: &MockServer) -> GitHubOAuthService {
    GitHubOAuthService::with_base_url(
        Url::parse(&mock_server.uri()).unwrap(),
        "client-123".to_string(),
        SecretString::from("shh".to_string()),
    )
}

#[test]
fn test_login_url_requests_public_repo_scope() {
    let service =
        GitHubOAuthService::new("client-123".to_string(), SecretString::from("shh".to_string()));

    let login = service.login_url();
    let url = Url::parse(&login.url).unwrap();
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    assert_eq!(url.host_str(), Some("github.com"));
    assert_eq!(url.path(), "/login/oauth/authorize");
    assert!(pairs.contains(&("client_id".to_string(), "client-123".to_string())));
    assert!(pairs.contains(&("scope".to_string(), "public_repo".to_string())));
    assert!(pairs.contains(&("state".to_string(), login.state.clone())));
}

#[test]
fn test_login_state_is_fresh_each_time() {
    let service =
        GitHubOAuthService::new("client-123".to_string(), SecretString::from("shh".to_string()));

    assert_ne!(service.login_url().state, service.login_url().state);
}

#[test]
fn test_from_lookup_requires_client_id_and_secret() {
    let missing_id = GitHubOAuthService::from_lookup(|_| None);
    assert!(matches!(missing_id, Err(AuthError::NotConfigured(key)) if key == "GITHUB_OAUTH_CLIENT_ID"));

    let missing_secret = GitHubOAuthService::from_lookup(|key| {
        (key == "GITHUB_OAUTH_CLIENT_ID").then(|| "client-123".to_string())
    });
    assert!(
        matches!(missing_secret, Err(AuthError::NotConfigured(key)) if key == "GITHUB_OAUTH_CLIENT_SECRET")
    );
}

#[test]
fn test_debug_redacts_secret() {
    let service =
        GitHubOAuthService::new("client-123".to_string(), SecretString::from("shh".to_string()));

    let text = format!("{:?}", service);

    assert!(text.contains("client-123"));
    assert!(!text.contains("shh"));
}

#[tokio::test]
async fn test_exchange_code_returns_token() {
    let mock_server = MockServer::start().await;
    let service = service_for(&mock_server);
    let state = service.login_url().state;

    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({
            "client_id": "client-123",
            "client_secret": "shh",
            "code": "abc",
            "state": state
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "gho_user_token",
            "token_type": "bearer",
            "scope": "public_repo"
        })))
        .mount(&mock_server)
        .await;

    let token = service.exchange_code("abc", Some(&state)).await.unwrap();

    assert_eq!(token.expose_secret(), "gho_user_token");
}

#[tokio::test]
async fn test_rejected_code_is_invalid_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "bad_verification_code",
            "error_description": "The code passed is incorrect or expired."
        })))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let state = service.login_url().state;
    let result = service.exchange_code("stale", Some(&state)).await;

    assert!(matches!(result, Err(AuthError::InvalidCredentials)));
}

#[tokio::test]
async fn test_server_error_is_github_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let state = service.login_url().state;
    let result = service.exchange_code("abc", Some(&state)).await;

    assert!(matches!(result, Err(AuthError::GitHubError(_))));
}

#[test]
fn test_login_state_verifies_until_it_expires() {
    let service =
        GitHubOAuthService::new("client-123".to_string(), SecretString::from("shh".to_string()));
    let now = Utc::now().timestamp();

    let state = service.login_url().state;

    assert!(service.verify_state(&state, now).is_ok());
    assert!(matches!(
        service.verify_state(&state, now + STATE_LIFETIME_SECS + 60),
        Err(AuthError::InvalidState)
    ));
}

#[test]
fn test_tampered_state_is_rejected() {
    let service =
        GitHubOAuthService::new("client-123".to_string(), SecretString::from("shh".to_string()));
    let now = Utc::now().timestamp();
    let state = service.signed_state("nonce", now + 60);

    let extended = state.replacen(&(now + 60).to_string(), &(now + 6000).to_string(), 1);
    let other_service =
        GitHubOAuthService::new("client-123".to_string(), SecretString::from("other".to_string()));

    assert!(matches!(
        service.verify_state(&extended, now),
        Err(AuthError::InvalidState)
    ));
    assert!(matches!(
        other_service.verify_state(&state, now),
        Err(AuthError::InvalidState)
    ));
    for forged in ["", "xyz", "nonce.123", "nonce.123.not-hex"] {
        assert!(matches!(
            service.verify_state(forged, now),
            Err(AuthError::InvalidState)
        ));
    }
}

#[tokio::test]
async fn test_exchange_code_rejects_bad_state_without_calling_github() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "gho_user_token"
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let expired = service.signed_state("nonce", Utc::now().timestamp() - 1);

    let missing = service.exchange_code("abc", None).await;
    let forged = service.exchange_code("abc", Some("xyz")).await;
    let stale = service.exchange_code("abc", Some(&expired)).await;

    assert!(matches!(missing, Err(AuthError::InvalidState)));
    assert!(matches!(forged, Err(AuthError::InvalidState)));
    assert!(matches!(stale, Err(AuthError::InvalidState)));
}

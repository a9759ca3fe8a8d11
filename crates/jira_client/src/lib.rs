//! Crate for looking up tickets in a Jira issue tracker.
//!
//! The checker only needs one operation from the tracker: given a ticket key, return
//! the ticket's status and summary, or nothing if the ticket does not exist. That
//! operation is the [`TicketClient`] trait. [`JiraClient`] implements it against the
//! Jira REST API and [`RetryingTicketClient`] wraps any implementation with a single
//! delayed retry for transient failures.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};
use url::Url;

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{Ticket, TicketFields, TicketStatus};

mod retry;
pub use retry::RetryingTicketClient;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Marker Jira puts in the error message of a lookup for an unknown issue.
const MISSING_ISSUE_MARKER: &str = "does not exist";

/// Read access to tickets.
#[async_trait]
pub trait TicketClient: Send + Sync {
    /// Fetches a ticket by key.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the tracker reports that the ticket does not exist.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] for transport failures, rejected credentials, and any
    /// other unexpected tracker response.
    async fn fetch_ticket(&self, issue_key: &str) -> Result<Option<Ticket>, Error>;
}

/// Credentials for the Jira REST API (user name plus API token).
#[derive(Debug, Clone)]
pub struct JiraCredentials {
    pub username: String,
    pub api_token: SecretString,
}

/// A client for the Jira REST API.
#[derive(Debug, Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<JiraCredentials>,
}

impl JiraClient {
    /// Creates a client for a tracker host such as `unicode-org.atlassian.net`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidUrl` if the host does not form a valid URL.
    pub fn new(host: &str, credentials: Option<JiraCredentials>) -> Result<Self, Error> {
        let base_url = Url::parse(&format!("https://{}/", host.trim_end_matches('/')))
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", host, e)))?;
        Ok(Self::with_base_url(base_url, credentials))
    }

    /// Creates a client for an explicit base URL.
    pub fn with_base_url(base_url: Url, credentials: Option<JiraCredentials>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            credentials,
        }
    }

    fn issue_url(&self, issue_key: &str) -> Result<Url, Error> {
        self.base_url
            .join(&format!("rest/api/2/issue/{}", issue_key))
            .map_err(|e| Error::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl TicketClient for JiraClient {
    #[instrument(skip(self), fields(issue_key = %issue_key))]
    async fn fetch_ticket(&self, issue_key: &str) -> Result<Option<Ticket>, Error> {
        let url = self.issue_url(issue_key)?;

        let mut request = self
            .http
            .get(url)
            .query(&[("fields", "status,summary")])
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(
                &credentials.username,
                Some(credentials.api_token.expose_secret()),
            );
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(status = status.as_u16(), "Issue tracker rejected the credentials");
            return Err(Error::Unauthorized);
        }

        if status == StatusCode::NOT_FOUND {
            let body: models::ErrorResponse = response.json().await.unwrap_or_default();
            if body
                .error_messages
                .iter()
                .any(|m| m.contains(MISSING_ISSUE_MARKER))
            {
                debug!("Ticket does not exist");
                return Ok(None);
            }
            return Err(Error::Status { status: 404 });
        }

        if !status.is_success() {
            warn!(status = status.as_u16(), "Unexpected issue tracker response");
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let issue: models::IssueResponse = serde_json::from_slice(&body).map_err(|e| {
            warn!(error = %e, "Issue tracker response could not be parsed");
            Error::InvalidResponse(e.to_string())
        })?;
        match issue.fields {
            Some(fields) => {
                let ticket = Ticket {
                    key: issue.key.unwrap_or_else(|| issue_key.to_string()),
                    fields,
                };
                debug!(status = %ticket.status_name(), "Fetched ticket");
                Ok(Some(ticket))
            }
            None => {
                debug!("Ticket has no visible fields");
                Ok(None)
            }
        }
    }
}

/// The human-facing link to a ticket on the given tracker host.
///
/// ```
/// assert_eq!(
///     jira_client::browse_url("unicode-org.atlassian.net", "ICU-123"),
///     "https://unicode-org.atlassian.net/browse/ICU-123"
/// );
/// ```
pub fn browse_url(host: &str, issue_key: &str) -> String {
    format!("https://{}/browse/{}", host.trim_end_matches('/'), issue_key)
}

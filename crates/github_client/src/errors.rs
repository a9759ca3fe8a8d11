//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. Status codes returned by GitHub are classified so that
//! callers can tell an expired or under-scoped token apart from a missing resource or a
//! generic failure.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.get_pull_request("owner", "repo", 4).await {
///     Ok(pr) => println!("PR title: {}", pr.title),
///     Err(Error::Unauthorized) => eprintln!("Token rejected, log in again"),
///     Err(Error::NotFound) => eprintln!("No such pull request"),
///     Err(err) => eprintln!("Other error: {}", err),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic API request failure.
    #[error("API request failed")]
    ApiError(),

    /// GitHub client initialization failure.
    ///
    /// This error occurs when the GitHub App credentials cannot be turned into a
    /// client, e.g. because the private key is not valid PEM.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// The credentials were rejected by GitHub (HTTP 401 or 403).
    ///
    /// For user tokens this usually means the token expired, was revoked, or lacks
    /// the scopes needed for the operation.
    #[error("GitHub rejected the credentials")]
    Unauthorized,

    /// Error deserializing the response from GitHub.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The GitHub API returned a response in an unexpected format.
    #[error("Invalid response format")]
    InvalidResponse,

    /// The requested resource was not found (HTTP 404).
    #[error("Resource not found")]
    NotFound,

    /// GitHub API rate limit has been exceeded (HTTP 429).
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl Error {
    /// Classifies an HTTP status code returned by GitHub.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Error::Unauthorized,
            404 => Error::NotFound,
            429 => Error::RateLimitExceeded,
            _ => Error::InvalidResponse,
        }
    }
}

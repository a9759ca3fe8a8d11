//! Error types for issue tracker operations.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while fetching tickets from the issue tracker.
///
/// A ticket that does not exist is not an error: [`crate::TicketClient::fetch_ticket`]
/// reports it as `Ok(None)`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or the response could not be read.
    #[error("Failed to reach the issue tracker: {0}")]
    Http(#[from] reqwest::Error),

    /// The tracker answered with an unexpected HTTP status.
    #[error("Issue tracker returned HTTP status {status}")]
    Status { status: u16 },

    /// The tracker rejected the configured credentials (HTTP 401 or 403).
    #[error("Issue tracker rejected the credentials")]
    Unauthorized,

    /// The response body did not have the expected shape.
    #[error("Invalid issue tracker response: {0}")]
    InvalidResponse(String),

    /// The tracker location could not be turned into a URL.
    #[error("Invalid issue tracker URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Whether repeating the same request later could plausibly succeed.
    ///
    /// Transport failures, rate limiting and server errors are transient; rejected
    /// credentials and malformed responses are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Http(e) => !e.is_decode() && !e.is_builder(),
            Error::Status { status } => *status >= 500 || *status == 429,
            Error::Unauthorized | Error::InvalidResponse(_) | Error::InvalidUrl(_) => false,
        }
    }
}

//! Error taxonomy of the checker.
//!
//! A failing check is not an error: a missing ticket, a bad commit message or too
//! many commits all produce a normal negative [`crate::Verdict`]. The errors in this
//! module are hard failures of a whole operation, raised when a collaborator cannot
//! be reached or rejects the request, and when the process configuration is invalid.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised by the checker operations.
#[derive(Error, Debug)]
pub enum CheckerError {
    /// The hosting platform could not be reached or rejected a request.
    #[error("GitHub request failed: {0}")]
    GitHub(#[source] github_client::Error),

    /// The issue tracker could not be reached or rejected a request.
    #[error("Issue tracker request failed: {0}")]
    Tracker(#[from] jira_client::Error),

    /// The user credentials used for a user-initiated operation were rejected.
    ///
    /// Callers should send the user through the sign-in flow again.
    #[error("Authentication required")]
    AuthenticationRequired,

    /// The pull request source branch no longer exists in any repository.
    #[error("The source repository of the pull request no longer exists")]
    MissingHeadRepository,

    /// A configuration value is missing or invalid.
    #[error("Invalid configuration value for {key}: {reason}")]
    Configuration { key: String, reason: String },
}

impl CheckerError {
    /// Creates a configuration error for the given key.
    pub fn configuration(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Configuration {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error means the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::GitHub(github_client::Error::NotFound))
    }
}

impl From<github_client::Error> for CheckerError {
    fn from(err: github_client::Error) -> Self {
        Self::GitHub(err)
    }
}

/// Result alias for checker operations.
pub type CheckerResult<T> = Result<T, CheckerError>;

use std::io;

use pr_checker_core::CheckerError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the PR Checker CLI application.
#[derive(Error, Debug)]
pub enum Error {
    /// The checker failed, either while reading its configuration or while
    /// talking to GitHub or the issue tracker.
    #[error(transparent)]
    Checker(#[from] CheckerError),

    /// Failed to read the pull request snapshot.
    ///
    /// This wraps I/O errors from the snapshot file or standard input.
    #[error("Failed to read pull request snapshot: {0}")]
    ReadInput(#[source] io::Error),

    /// The pull request snapshot is not valid pull request JSON.
    #[error("Invalid pull request snapshot: {0}")]
    InvalidSnapshot(#[source] serde_json::Error),

    /// A result could not be written as JSON.
    #[error("Failed to format output: {0}")]
    Output(#[source] serde_json::Error),
}

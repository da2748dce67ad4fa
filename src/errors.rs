/// Run-level errors and their exit codes.
use thiserror::Error;

use crate::transit::TransitError;

/// Errors that end a run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid flags or environment (e.g. missing token).
    #[error("{0}")]
    Configuration(String),

    /// The HTTP client could not be set up.
    #[error(transparent)]
    Client(#[from] TransitError),

    /// Every stop was attempted, but some had request failures.
    #[error("{failed} of {total} stop(s) could not be fully retrieved")]
    StopsFailed {
        /// Stops with at least one failed request.
        failed: usize,
        /// Stops attempted.
        total: usize,
    },
}

impl AppError {
    /// Return the CLI exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Client(_) => 2,
            Self::StopsFailed { .. } => 1,
        }
    }
}

//! Error types for the portfolio catalog.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or querying the catalog.
#[derive(Error, Debug)]
pub enum Error {
    /// A project could not be constructed from the supplied fields.
    #[error("invalid project data: {0}")]
    InvalidProjectData(String),

    /// No project with the requested id exists in the catalog.
    #[error("project {0} not found")]
    NotFound(u64),

    /// JSON parsing error (seed files).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidProjectData(reason.into())
    }
}

//! Error types for bulk-indexer

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in bulk-indexer
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid configuration value
    #[error("configuration error: {0}")]
    Config(String),

    /// No usable credentials, or the token exchange was rejected
    #[error("authentication error: {0}")]
    Auth(String),

    /// An input file (CSV, URL list, service account key) does not exist
    #[error("{what} not found at {}", path.display())]
    InputNotFound {
        /// What kind of file was expected
        what: &'static str,
        /// Path that was checked
        path: PathBuf,
    },

    /// A URL could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The offending input
        url: String,
        /// Parser message
        reason: String,
    },

    /// The indexing endpoint answered with a non-success status
    #[error("indexing API returned {status}: {message}")]
    IndexingApi {
        /// HTTP status code
        status: u16,
        /// Error message from the response body
        message: String,
    },

    /// Network or protocol failure talking to a remote endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Failure signing the service account assertion
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Malformed CSV input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bug or unexpected state
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error is a per-item transport failure.
    ///
    /// Transport failures are tallied against the failure limit; every other
    /// error aborts the command before or outside the submission loop.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::IndexingApi { .. })
    }
}

/// Result type alias using bulk-indexer's Error
pub type Result<T> = std::result::Result<T, Error>;

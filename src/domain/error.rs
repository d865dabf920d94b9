//! Error types for the RepoScout plugin.
//!
//! This module defines the centralized error type [`RepoScoutError`] and a type alias
//! [`Result`] used throughout the plugin. All errors are implemented using the
//! `thiserror` crate.
//!
//! Request failures never escape the search controller: they are caught at the
//! request boundary and turned into a [`SearchError`](crate::app::state::SearchError)
//! shown in the error banner. The remaining variants cover configuration, theme
//! loading and local I/O.

use thiserror::Error;

/// The main error type for RepoScout operations.
///
/// # Examples
///
/// ```
/// use reposcout::RepoScoutError;
///
/// let err = RepoScoutError::Network("GitHub API error (503)".to_string());
/// assert_eq!(err.to_string(), "Network error: GitHub API error (503)");
/// ```
#[derive(Debug, Error)]
pub enum RepoScoutError {
    /// A search request failed in transport or the API answered with a
    /// non-success status.
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered successfully but the body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for RepoScoutError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// A specialized `Result` type for RepoScout operations.
pub type Result<T> = std::result::Result<T, RepoScoutError>;

//! Error types for media-fetch
//!
//! Failures originate inside the engine and travel to the process boundary
//! unchanged. The shell never retries or recovers; these variants only give
//! the failure a shape.

use thiserror::Error;

/// Result type alias for media-fetch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for media-fetch
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "urls")
        key: Option<String>,
    },

    /// URL rejected before it was handed to the engine
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// The offending URL as given
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// The engine reported an unrecoverable failure
    #[error("download of {url} failed: {reason}")]
    Download {
        /// URL (or space-joined URL list) that was being downloaded
        url: String,
        /// Last error reported by the engine
        reason: String,
        /// Exit code of the engine process, when it has one
        exit_code: Option<i32>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// External tool execution failed (yt-dlp)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Operation not supported (missing binary, etc.)
    #[error("not supported: {0}")]
    NotSupported(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a [`Error::Config`] tied to a settings key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}

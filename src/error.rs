//! Error types for helpchunk.
//!
//! The extraction and chunking core performs no I/O, so the only error it can
//! raise is [`Error::InvalidConfig`]. Everything else comes from the
//! collaborators (fetcher, sink, config loading).

use crate::fetch::FetchError;

/// Error type for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configuration value is out of range (e.g. `max_length == 0`).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Fetching a document failed.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A config file could not be parsed.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// True when a sink refused to replace an existing chunk.
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::AlreadyExists)
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

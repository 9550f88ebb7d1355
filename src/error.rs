//! Error types for the file cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache admissions.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Source identifier is not of a kind the resolver handles.
    ///
    /// Raised before any I/O is attempted; the cache directory and the
    /// index are left completely untouched.
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// The resolver could not open the source (e.g. it no longer exists).
    ///
    /// No filesystem writes have been performed.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// The cache directory could not be created, or the destination file
    /// could not be created or written.
    ///
    /// A partially written destination file may remain on storage with no
    /// corresponding index entry.
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        cause: std::io::Error,
    },
}

impl CacheError {
    /// Builds a `Storage` error from a message and the underlying I/O cause.
    pub(crate) fn storage(message: impl Into<String>, cause: std::io::Error) -> Self {
        CacheError::Storage {
            message: message.into(),
            cause,
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

//! Error types for memtap
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using MemtapError
pub type Result<T> = std::result::Result<T, MemtapError>;

/// Unified error type for memtap operations
#[derive(Debug, Error)]
pub enum MemtapError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("error \"{source}\" while connecting to memcached on {host}:{port}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Command Errors
    // -------------------------------------------------------------------------
    #[error("error when trying to set value: {value} for the key: {key}")]
    Set { key: String, value: String },

    #[error("error when trying to get value for the key: {key}")]
    Get { key: String },

    #[error("no value found with key: {key}")]
    KeyNotFound { key: String },

    #[error("error when trying to delete value for the key: {key}")]
    Delete { key: String },
}

impl MemtapError {
    /// Whether this error is the not-found outcome of a `delete`.
    ///
    /// This is the only error a caller may reasonably treat as success,
    /// which is what [`crate::Client::delete_if_exists`] does.
    pub fn is_key_not_found(&self) -> bool {
        matches!(self, MemtapError::KeyNotFound { .. })
    }
}

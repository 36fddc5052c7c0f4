//! Error types for proofforge-store

use thiserror::Error;

/// Errors that can occur in the persistence layer.
///
/// A failed append is always surfaced through one of these - never silently
/// dropped, since it means a fully computed evaluation would be lost.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing-file I/O failure
    #[error("Storage I/O failed: {0}")]
    Io(String),

    /// Record (de)serialization failure
    #[error("Storage serialization failed: {0}")]
    Serialization(String),

    /// The backing file exists but does not parse as an evaluation history
    #[error("Storage file corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

//! Error types for proofforge-core

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Error, Debug)]
pub enum CoreError {
    /// A string failed trace-digest validation (not 64 hex chars)
    #[error("Invalid trace digest: {digest}")]
    InvalidDigest { digest: String },

    /// A repository owner or name failed identifier validation
    #[error("Invalid repository identifier: {identifier}")]
    InvalidIdentifier { identifier: String },
}

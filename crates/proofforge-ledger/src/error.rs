//! Error types for proofforge-ledger

use thiserror::Error;

/// Errors that can occur when talking to the external ledger.
///
/// Transient errors are eligible for retry; permanent ones are not.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Network or service unavailability (transient)
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    /// The per-call timeout budget elapsed (transient)
    #[error("Ledger call timed out after {0} ms")]
    Timeout(u64),

    /// Invalid or missing operator credentials (permanent)
    #[error("Invalid ledger credentials: {0}")]
    InvalidCredentials(String),

    /// The topic reference does not exist or is malformed (permanent)
    #[error("Malformed topic reference: {0}")]
    MalformedTopic(String),
}

impl LedgerError {
    /// Whether the submitter may retry after this error.
    pub fn is_transient(&self) -> bool {
        matches!(self, LedgerError::Unavailable(_) | LedgerError::Timeout(_))
    }
}

//! The ledger collaborator seam.

use async_trait::async_trait;

use crate::error::LedgerError;
use crate::topic::TopicId;

/// External append-only ledger client.
///
/// Implementations own the wire protocol and signing; callers only hand
/// over message bytes and receive an immutable transaction reference.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Append `message` to `topic`, returning the ledger transaction id.
    async fn submit_message(&self, topic: &TopicId, message: &[u8])
        -> Result<String, LedgerError>;
}

/// Stand-in client used when no ledger endpoint is configured.
///
/// Fails permanently on the first attempt, so evaluations complete and
/// persist immediately with an absent transaction id instead of burning
/// retries against nothing.
#[derive(Debug, Default)]
pub struct UnconfiguredLedger;

#[async_trait]
impl LedgerClient for UnconfiguredLedger {
    async fn submit_message(
        &self,
        _topic: &TopicId,
        _message: &[u8],
    ) -> Result<String, LedgerError> {
        Err(LedgerError::InvalidCredentials(
            "no ledger endpoint configured".to_string(),
        ))
    }
}

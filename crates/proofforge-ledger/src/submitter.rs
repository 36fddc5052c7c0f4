//! Retry-then-degrade submission of proof messages.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::client::LedgerClient;
use crate::error::LedgerError;
use crate::message::ProofMessage;
use crate::topic::TopicId;

/// Bounds on the submission attempt loop.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,

    /// Backoff before the second attempt; doubles each retry
    pub initial_backoff: Duration,

    /// Per-call timeout budget; an elapsed budget counts as transient
    pub call_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(250),
            call_timeout: Duration::from_secs(10),
        }
    }
}

/// Tagged result of a submission. Degraded operation is a normal outcome
/// here, not an error: the evaluation pipeline persists its record either
/// way, and only the transaction id differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The ledger accepted the message
    Anchored { transaction_id: String },

    /// Transient failures exhausted the retry budget
    Degraded { attempts: u32 },

    /// A permanent failure; reported, never retried
    Rejected { reason: String },
}

impl SubmissionOutcome {
    /// The transaction id, when anchored.
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Anchored { transaction_id } => Some(transaction_id),
            _ => None,
        }
    }

    pub fn is_anchored(&self) -> bool {
        matches!(self, SubmissionOutcome::Anchored { .. })
    }
}

/// Commits proof messages to a topic via a `LedgerClient`, applying the
/// bounded retry policy. Has no effect on scores or digests and never
/// propagates a failure to the caller.
pub struct ProofSubmitter {
    client: Arc<dyn LedgerClient>,
    topic: TopicId,
    policy: RetryPolicy,
}

impl ProofSubmitter {
    pub fn new(client: Arc<dyn LedgerClient>, topic: TopicId, policy: RetryPolicy) -> Self {
        ProofSubmitter {
            client,
            topic,
            policy,
        }
    }

    pub fn topic(&self) -> &TopicId {
        &self.topic
    }

    /// Submit one proof message.
    ///
    /// Transient failures (unavailability, timeout) retry up to
    /// `max_attempts` with doubling backoff, then degrade. Permanent
    /// failures return `Rejected` immediately.
    pub async fn submit(&self, message: &ProofMessage) -> SubmissionOutcome {
        let bytes = message.to_bytes();
        let mut backoff = self.policy.initial_backoff;

        for attempt in 1..=self.policy.max_attempts {
            let call = self.client.submit_message(&self.topic, &bytes);
            let result = match tokio::time::timeout(self.policy.call_timeout, call).await {
                Ok(result) => result,
                Err(_) => Err(LedgerError::Timeout(
                    self.policy.call_timeout.as_millis() as u64
                )),
            };

            match result {
                Ok(transaction_id) => {
                    info!(
                        "proof for {} anchored on topic {} (tx {})",
                        message.repository_key, self.topic, transaction_id
                    );
                    return SubmissionOutcome::Anchored { transaction_id };
                }
                Err(e) if e.is_transient() => {
                    warn!(
                        "ledger attempt {}/{} for {} failed: {}",
                        attempt, self.policy.max_attempts, message.repository_key, e
                    );
                    if attempt < self.policy.max_attempts {
                        tokio::time::sleep(backoff).await;
                        backoff *= 2;
                    }
                }
                Err(e) => {
                    warn!(
                        "ledger rejected proof for {}: {}",
                        message.repository_key, e
                    );
                    return SubmissionOutcome::Rejected {
                        reason: e.to_string(),
                    };
                }
            }
        }

        warn!(
            "proof for {} degraded after {} attempts",
            message.repository_key, self.policy.max_attempts
        );
        SubmissionOutcome::Degraded {
            attempts: self.policy.max_attempts,
        }
    }
}

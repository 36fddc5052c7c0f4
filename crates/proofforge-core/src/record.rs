//! Evaluation records - the immutable units of the append-only history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::digest::TraceDigest;

/// A fully computed evaluation awaiting persistence.
///
/// Everything except the `record_id`, which the store assigns inside its
/// writer lock so ids stay strictly increasing across concurrent appends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationDraft {
    /// Canonical `owner/name` key
    pub repository_key: String,

    /// Sum of matched rule weights
    pub score: i64,

    /// Messages of matched rules, in rule-table order
    pub trace: Vec<String>,

    /// Canonical SHA-256 commitment over the trace
    pub trace_hash: TraceDigest,

    /// Ledger transaction reference; absent on degraded or rejected
    /// submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_transaction_id: Option<String>,

    /// When the evaluation was computed
    pub created_at: DateTime<Utc>,
}

impl EvaluationDraft {
    /// Attach a store-assigned id, producing the final record.
    pub fn into_record(self, record_id: u64) -> EvaluationRecord {
        EvaluationRecord {
            record_id,
            repository_key: self.repository_key,
            score: self.score,
            trace: self.trace,
            trace_hash: self.trace_hash,
            ledger_transaction_id: self.ledger_transaction_id,
            created_at: self.created_at,
        }
    }
}

/// One entry in the append-only evaluation history.
///
/// Immutable once created: corrections require appending a new record,
/// never editing this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    /// Strictly increasing across the whole store; never reused
    pub record_id: u64,

    /// Canonical `owner/name` key
    pub repository_key: String,

    /// Sum of matched rule weights
    pub score: i64,

    /// Messages of matched rules, in rule-table order
    pub trace: Vec<String>,

    /// Canonical SHA-256 commitment over the trace
    pub trace_hash: TraceDigest,

    /// Ledger transaction reference; absent on degraded or rejected
    /// submission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_transaction_id: Option<String>,

    /// When the evaluation was computed
    pub created_at: DateTime<Utc>,
}

impl EvaluationRecord {
    /// Whether the record carries an external ledger anchor.
    pub fn is_anchored(&self) -> bool {
        self.ledger_transaction_id.is_some()
    }
}

//! The minimal proof message anchored on the ledger.

use chrono::{DateTime, Utc};
use proofforge_core::TraceDigest;
use serde::{Deserialize, Serialize};

/// Exactly the four fields committed externally: repository key, score,
/// trace digest, timestamp. The full trace stays local; only its digest
/// leaves the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofMessage {
    pub repository_key: String,
    pub score: i64,
    pub trace_hash: TraceDigest,
    pub timestamp: DateTime<Utc>,
}

impl ProofMessage {
    /// Canonical JSON bytes handed to the ledger client.
    pub fn to_bytes(&self) -> Vec<u8> {
        // A struct of strings, an integer, and a timestamp cannot fail to
        // encode.
        serde_json::to_vec(self).expect("proof message encoding is infallible")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_round_trip() {
        let message = ProofMessage {
            repository_key: "octo/hello".to_string(),
            score: 45,
            trace_hash: TraceDigest::of_trace(&["has tests: +25".to_string()]),
            timestamp: Utc::now(),
        };

        let bytes = message.to_bytes();
        let back: ProofMessage = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn message_carries_only_the_committed_fields() {
        let message = ProofMessage {
            repository_key: "octo/hello".to_string(),
            score: 45,
            trace_hash: TraceDigest::of_trace(&[]),
            timestamp: Utc::now(),
        };

        let value: serde_json::Value = serde_json::from_slice(&message.to_bytes()).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(
            keys.len(),
            4,
            "only repository_key, score, trace_hash, timestamp: {keys:?}"
        );
    }
}

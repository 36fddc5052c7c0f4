//! Canonical trace hashing.
//!
//! The digest is the system's sole cryptographic commitment: a SHA-256 over
//! a canonical byte encoding of the trace. No signing or encryption happens
//! at this layer.

use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::CoreError;

/// Trace digest (SHA-256 hex string).
///
/// The inner field is private to guarantee the string is always valid
/// lowercase hex produced by `of_trace`/`from_bytes` or validated via
/// `TryFrom<String>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceDigest(String);

impl TraceDigest {
    /// Hash a trace.
    ///
    /// Canonical bytes are the JSON array encoding of the trace, which
    /// preserves element order and exact string content. Identical traces
    /// always hash identically; any reorder, insertion, deletion, or edit
    /// changes the digest.
    pub fn of_trace(trace: &[String]) -> Self {
        // JSON encoding of a string slice cannot fail.
        let canonical =
            serde_json::to_vec(trace).expect("JSON encoding of a string slice is infallible");
        Self::from_bytes(&canonical)
    }

    /// Compute the SHA-256 digest of raw bytes.
    pub fn from_bytes(data: &[u8]) -> Self {
        use sha2::Digest;
        let mut hasher = Sha256::new();
        hasher.update(data);
        TraceDigest(hex::encode(hasher.finalize()))
    }

    /// Return the full hex string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form (first 12 hex chars).
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }
}

impl TryFrom<String> for TraceDigest {
    type Error = CoreError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        if s.len() != 64 || !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidDigest { digest: s });
        }
        Ok(TraceDigest(s.to_ascii_lowercase()))
    }
}

impl std::fmt::Display for TraceDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identical_traces_hash_identically() {
        let t = trace(&["has tests: +25", "no open issues: +15"]);
        assert_eq!(TraceDigest::of_trace(&t), TraceDigest::of_trace(&t));
    }

    #[test]
    fn digest_is_lowercase_hex_of_sha256_width() {
        let d = TraceDigest::of_trace(&trace(&["has tests: +25"]));
        assert_eq!(d.as_str().len(), 64);
        assert!(d.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(d.as_str(), d.as_str().to_ascii_lowercase());
    }

    #[test]
    fn reordering_changes_the_digest() {
        let forward = trace(&["a: +1", "b: +2"]);
        let reversed = trace(&["b: +2", "a: +1"]);
        assert_ne!(
            TraceDigest::of_trace(&forward),
            TraceDigest::of_trace(&reversed)
        );
    }

    #[test]
    fn truncation_changes_the_digest() {
        let full = trace(&["a: +1", "b: +2"]);
        let truncated = trace(&["a: +1"]);
        assert_ne!(
            TraceDigest::of_trace(&full),
            TraceDigest::of_trace(&truncated)
        );
    }

    #[test]
    fn single_character_edit_changes_the_digest() {
        let original = trace(&["has tests: +25"]);
        let edited = trace(&["has tests: +26"]);
        assert_ne!(
            TraceDigest::of_trace(&original),
            TraceDigest::of_trace(&edited)
        );
    }

    #[test]
    fn empty_trace_hashes_stably() {
        let empty: Vec<String> = vec![];
        assert_eq!(TraceDigest::of_trace(&empty), TraceDigest::of_trace(&empty));
        assert_ne!(
            TraceDigest::of_trace(&empty),
            TraceDigest::of_trace(&trace(&[""]))
        );
    }

    #[test]
    fn try_from_validates_hex_strings() {
        let good = "a".repeat(64);
        assert!(TraceDigest::try_from(good).is_ok());

        assert!(TraceDigest::try_from("short".to_string()).is_err());
        assert!(TraceDigest::try_from("z".repeat(64)).is_err());
    }

    #[test]
    fn try_from_normalizes_to_lowercase() {
        let upper = "ABCDEF".repeat(10) + "ABCD";
        let digest = TraceDigest::try_from(upper).unwrap();
        assert_eq!(digest.as_str(), digest.as_str().to_ascii_lowercase());
    }

    #[test]
    fn short_form_is_a_prefix() {
        let d = TraceDigest::of_trace(&trace(&["x"]));
        assert_eq!(d.short().len(), 12);
        assert!(d.as_str().starts_with(d.short()));
    }
}

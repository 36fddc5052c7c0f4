//! Consensus-topic references.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Reference to an append-only consensus topic, in `shard.realm.num` form
/// (e.g. `0.0.4812`).
///
/// The inner field is private so every instance has passed the grammar
/// check; a malformed reference is a permanent error at the boundary, not
/// something the submitter retries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicId(String);

impl TopicId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TopicId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let well_formed = parts.len() == 3
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()));
        if !well_formed {
            return Err(LedgerError::MalformedTopic(s.to_string()));
        }
        Ok(TopicId(s.to_string()))
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//! The append-only storage trait.

use async_trait::async_trait;
use proofforge_core::{EvaluationDraft, EvaluationRecord};

use crate::error::StoreError;

/// Result type for storage operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Append-only evaluation record store.
///
/// Guarantees:
/// - No update or delete exists in the contract; corrections are new records.
/// - `query_all` returns records in append order.
/// - `append` assigns a `record_id` strictly greater than every id already
///   in the store; ids are never reused.
/// - Appends are serialized with respect to each other; reads observe either
///   the pre- or post-append state, never a partially written record.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Persist a computed evaluation, assigning its record id.
    ///
    /// A failed append is reported as a distinct error, never dropped.
    async fn append(&self, draft: EvaluationDraft) -> StoreResult<EvaluationRecord>;

    /// All records for `owner/name`, in append order. An unknown repository
    /// yields an empty sequence, not an error.
    async fn query_by_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> StoreResult<Vec<EvaluationRecord>>;

    /// Every record in the store, in append order.
    async fn query_all(&self) -> StoreResult<Vec<EvaluationRecord>>;
}

//! In-memory fake for the `ResultStore` trait (testing only).

use std::sync::Mutex;

use async_trait::async_trait;
use proofforge_core::{EvaluationDraft, EvaluationRecord};

use crate::result_store::{ResultStore, StoreResult};

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<EvaluationRecord>,
    last_id: u64,
}

/// In-memory result store backed by a `Mutex<Vec<EvaluationRecord>>`.
///
/// Satisfies the full `ResultStore` contract without touching disk.
#[derive(Debug, Default)]
pub struct MemoryResultStore {
    state: Mutex<MemoryState>,
}

impl MemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn append(&self, draft: EvaluationDraft) -> StoreResult<EvaluationRecord> {
        let mut state = self.state.lock().unwrap();
        let record = draft.into_record(state.last_id + 1);
        state.last_id += 1;
        state.records.push(record.clone());
        Ok(record)
    }

    async fn query_by_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> StoreResult<Vec<EvaluationRecord>> {
        let key = format!("{owner}/{name}");
        let state = self.state.lock().unwrap();
        Ok(state
            .records
            .iter()
            .filter(|r| r.repository_key == key)
            .cloned()
            .collect())
    }

    async fn query_all(&self) -> StoreResult<Vec<EvaluationRecord>> {
        let state = self.state.lock().unwrap();
        Ok(state.records.clone())
    }
}

//! Durable `ResultStore` backed by a JSON-array file.
//!
//! Layout: one JSON array of `EvaluationRecord` objects, rewritten in full
//! on each append via temp-file + atomic rename. A single async mutex
//! serializes the read-modify-write, so concurrent appends never lose each
//! other's records and reads always observe a complete pre- or post-append
//! state.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use proofforge_core::{EvaluationDraft, EvaluationRecord};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::result_store::{ResultStore, StoreResult};

#[derive(Debug)]
struct FileState {
    records: Vec<EvaluationRecord>,
    last_id: u64,
}

/// Durable, append-only result store persisted as a JSON file.
#[derive(Debug)]
pub struct JsonFileResultStore {
    path: PathBuf,
    state: Mutex<FileState>,
}

impl JsonFileResultStore {
    /// Open (or create) a store at `path`.
    ///
    /// Existing records are loaded into memory and id assignment resumes at
    /// `max(record_id) + 1`, so ids stay strictly increasing across process
    /// restarts. A file that exists but does not parse is reported as
    /// `StoreError::Corrupt` rather than silently truncated.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let records = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<EvaluationRecord>>(&bytes)
                .map_err(|e| StoreError::Corrupt(format!("{}: {e}", path.display())))?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        let last_id = records.iter().map(|r| r.record_id).max().unwrap_or(0);
        info!(
            "result store opened: {} ({} records)",
            path.display(),
            records.len()
        );

        Ok(JsonFileResultStore {
            path,
            state: Mutex::new(FileState { records, last_id }),
        })
    }

    /// Rewrite the backing file atomically: serialize next to the target,
    /// then rename over it.
    async fn persist(&self, records: &[EvaluationRecord]) -> StoreResult<()> {
        let bytes = serde_json::to_vec_pretty(records)?;
        let tmp = tmp_path(&self.path);
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut os: OsString = path.as_os_str().to_os_string();
    os.push(".tmp");
    PathBuf::from(os)
}

#[async_trait]
impl ResultStore for JsonFileResultStore {
    async fn append(&self, draft: EvaluationDraft) -> StoreResult<EvaluationRecord> {
        let mut state = self.state.lock().await;
        let record = draft.into_record(state.last_id + 1);
        state.records.push(record.clone());

        if let Err(e) = self.persist(&state.records).await {
            // The in-memory view must match the file: roll back the push.
            state.records.pop();
            return Err(e);
        }
        state.last_id = record.record_id;

        debug!(
            "appended record #{} for {} ({} bytes of trace)",
            record.record_id,
            record.repository_key,
            record.trace.iter().map(String::len).sum::<usize>()
        );
        Ok(record)
    }

    async fn query_by_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> StoreResult<Vec<EvaluationRecord>> {
        let key = format!("{owner}/{name}");
        let state = self.state.lock().await;
        Ok(state
            .records
            .iter()
            .filter(|r| r.repository_key == key)
            .cloned()
            .collect())
    }

    async fn query_all(&self) -> StoreResult<Vec<EvaluationRecord>> {
        let state = self.state.lock().await;
        Ok(state.records.clone())
    }
}

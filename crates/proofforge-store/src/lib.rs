//! ProofForge Store: Append-Only Evaluation Persistence
//!
//! This crate owns the evaluation history. The public contract is strictly
//! append-only: records are never updated or deleted, insertion order is
//! query order, and record ids are strictly increasing store-wide.
//!
//! ## Key Components
//!
//! - `ResultStore`: the storage trait the orchestrator writes through
//! - `JsonFileResultStore`: durable backend (transactional file rewrite
//!   behind a single writer lock)
//! - `MemoryResultStore`: in-memory fake satisfying the same contract

mod error;
mod json_file;
mod memory;
mod result_store;

pub use error::StoreError;
pub use json_file::JsonFileResultStore;
pub use memory::MemoryResultStore;
pub use result_store::{ResultStore, StoreResult};

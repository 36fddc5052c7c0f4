//! ProofForge Core: Explainable Repository Evaluation
//!
//! This crate holds the pure heart of the pipeline: the rule-based evaluator
//! that turns repository metadata into a score plus an ordered reasoning
//! trace, and the canonical hashing of that trace into a tamper-evidence
//! commitment.
//!
//! ## Guarantees
//!
//! - `RuleSet::evaluate` is deterministic, performs no I/O, and never fails.
//! - `TraceDigest::of_trace` is a pure function of the trace's ordered
//!   content only - never of the score, timestamp, or repository identity.
//!
//! ## Key Components
//!
//! - `RuleSet` / `Rule`: declarative scoring table, read-only after startup
//! - `TraceDigest`: canonical SHA-256 commitment over a trace
//! - `EvaluationRecord`: immutable, append-only evaluation history entry

mod digest;
mod error;
mod record;
mod rules;
mod summary;

pub use digest::TraceDigest;
pub use error::CoreError;
pub use record::{EvaluationDraft, EvaluationRecord};
pub use rules::{Evaluation, Rule, RuleSet};
pub use summary::{is_valid_owner, is_valid_repo_name, RepositorySummary};

/// Result type for proofforge-core operations
pub type Result<T> = std::result::Result<T, CoreError>;

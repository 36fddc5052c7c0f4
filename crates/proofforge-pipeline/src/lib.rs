//! ProofForge Pipeline: Evaluation Orchestration
//!
//! Sequences one evaluation transaction end to end: rule evaluation, trace
//! hashing, proof anchoring, durable persistence. Each stage's output is
//! the next stage's only input.
//!
//! ## Failure policy
//!
//! Ledger outcomes never fail the operation - a degraded or rejected anchor
//! still yields a complete, persisted record with an absent transaction id.
//! Only a store append failure is fatal, since it would otherwise lose a
//! fully computed evaluation.

mod config;
mod error;
mod metadata;
mod pipeline;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use metadata::{MetadataError, MetadataProvider, StaticMetadataProvider};
pub use pipeline::{EvaluationPipeline, EvaluationReport};

//! Error types for proofforge-pipeline

use proofforge_store::StoreError;
use thiserror::Error;

use crate::metadata::MetadataError;

/// Failures that can abort an evaluation request.
///
/// Ledger failures are deliberately absent: they surface as a tagged
/// `SubmissionOutcome` on the report, never as an error.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Owner or repository name failed identifier validation
    #[error("Invalid repository identifier: {identifier}")]
    InvalidRepository { identifier: String },

    /// Metadata could not be fetched; no record is created
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// The computed record could not be persisted (fatal; the evaluation
    /// is otherwise valid and its loss must be reported)
    #[error("Evaluation record could not be persisted: {0}")]
    Persistence(#[from] StoreError),

    /// Startup wiring failed (bad topic reference, client init)
    #[error("Invalid pipeline configuration: {0}")]
    Configuration(String),
}

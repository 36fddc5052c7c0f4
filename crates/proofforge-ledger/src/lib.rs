//! ProofForge Ledger: Proof Anchoring
//!
//! Commits evaluation digests to an external append-only consensus topic.
//! The wire protocol and signing belong to the collaborator behind the
//! `LedgerClient` trait; this crate owns the message layout and the
//! retry-then-degrade submission policy.
//!
//! A failed anchor never fails an evaluation: transient errors are retried
//! with doubling backoff, then the submitter returns a tagged
//! `SubmissionOutcome::Degraded`; permanent errors short-circuit to
//! `SubmissionOutcome::Rejected`. Either way the pipeline persists its
//! record with an absent transaction id.

mod client;
mod error;
mod http;
mod message;
mod submitter;
mod topic;

pub use client::{LedgerClient, UnconfiguredLedger};
pub use error::LedgerError;
pub use http::HttpLedgerClient;
pub use message::ProofMessage;
pub use submitter::{ProofSubmitter, RetryPolicy, SubmissionOutcome};
pub use topic::TopicId;

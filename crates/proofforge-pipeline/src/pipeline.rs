//! The evaluation orchestrator.

use std::sync::Arc;

use chrono::Utc;
use proofforge_core::{
    is_valid_owner, is_valid_repo_name, CoreError, EvaluationDraft, EvaluationRecord,
    RepositorySummary, RuleSet, TraceDigest,
};
use proofforge_ledger::{
    HttpLedgerClient, LedgerClient, ProofMessage, ProofSubmitter, SubmissionOutcome,
    UnconfiguredLedger,
};
use proofforge_store::{JsonFileResultStore, ResultStore};
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::metadata::MetadataProvider;

/// Result of one evaluation transaction: the persisted record plus the
/// ledger outcome, so a permanent anchor failure stays reportable alongside
/// the otherwise-successful evaluation.
#[derive(Debug, Clone)]
pub struct EvaluationReport {
    pub record: EvaluationRecord,
    pub submission: SubmissionOutcome,
}

/// Sequences Evaluator -> TraceHasher -> ProofSubmitter -> ResultStore for
/// each request. The rule table is shared read-only; the store serializes
/// its own appends. There is no whole-pipeline retry - retry scope is
/// confined to the submitter.
pub struct EvaluationPipeline {
    rules: Arc<RuleSet>,
    submitter: ProofSubmitter,
    store: Arc<dyn ResultStore>,
}

impl EvaluationPipeline {
    pub fn new(rules: Arc<RuleSet>, submitter: ProofSubmitter, store: Arc<dyn ResultStore>) -> Self {
        EvaluationPipeline {
            rules,
            submitter,
            store,
        }
    }

    /// Wire a pipeline from configuration: durable JSON-file store, and an
    /// HTTP relay client when an endpoint is configured (a permanent-failing
    /// stand-in otherwise, so records persist unanchored without retries).
    pub async fn from_config(config: &PipelineConfig) -> Result<Self, PipelineError> {
        let topic = config
            .topic
            .parse()
            .map_err(|e| PipelineError::Configuration(format!("topic: {e}")))?;

        let client: Arc<dyn LedgerClient> = match &config.ledger_endpoint {
            Some(endpoint) => Arc::new(
                HttpLedgerClient::new(endpoint.clone(), config.ledger_token.clone())
                    .map_err(|e| PipelineError::Configuration(e.to_string()))?,
            ),
            None => Arc::new(UnconfiguredLedger),
        };

        let store = JsonFileResultStore::open(&config.store_path).await?;

        Ok(EvaluationPipeline::new(
            Arc::new(RuleSet::standard()),
            ProofSubmitter::new(client, topic, config.retry.clone()),
            Arc::new(store),
        ))
    }

    /// Run one evaluation transaction over an already-fetched summary.
    ///
    /// The summary's identifiers are validated here, so every entry path
    /// shares one enforcement point for the `owner/name` grammar. Then
    /// strictly in order: evaluate, hash, submit, append. Any submission
    /// outcome still persists a record; only an append failure is fatal.
    pub async fn evaluate(
        &self,
        summary: RepositorySummary,
    ) -> Result<EvaluationReport, PipelineError> {
        summary.validate().map_err(|e| match e {
            CoreError::InvalidIdentifier { identifier } => {
                PipelineError::InvalidRepository { identifier }
            }
            other => PipelineError::Configuration(other.to_string()),
        })?;
        let repository_key = summary.repository_key();

        let evaluation = self.rules.evaluate(&summary);
        let trace_hash = TraceDigest::of_trace(&evaluation.trace);
        let created_at = Utc::now();

        let message = ProofMessage {
            repository_key: repository_key.clone(),
            score: evaluation.score,
            trace_hash: trace_hash.clone(),
            timestamp: created_at,
        };
        let submission = self.submitter.submit(&message).await;

        let draft = EvaluationDraft {
            repository_key,
            score: evaluation.score,
            trace: evaluation.trace,
            trace_hash,
            ledger_transaction_id: submission.transaction_id().map(str::to_string),
            created_at,
        };
        let record = self.store.append(draft).await?;

        info!(
            "record #{} for {}: score {}, digest {}, {}",
            record.record_id,
            record.repository_key,
            record.score,
            record.trace_hash.short(),
            if record.is_anchored() {
                "anchored"
            } else {
                "unanchored"
            }
        );

        Ok(EvaluationReport { record, submission })
    }

    /// Fetch metadata through the consumed provider, then evaluate.
    pub async fn evaluate_repository(
        &self,
        provider: &dyn MetadataProvider,
        owner: &str,
        name: &str,
    ) -> Result<EvaluationReport, PipelineError> {
        if !is_valid_owner(owner) {
            return Err(PipelineError::InvalidRepository {
                identifier: owner.to_string(),
            });
        }
        if !is_valid_repo_name(name) {
            return Err(PipelineError::InvalidRepository {
                identifier: name.to_string(),
            });
        }

        let summary = provider.fetch_summary(owner, name).await?;
        self.evaluate(summary).await
    }

    /// Stored history for one repository, in append order.
    pub async fn list_by_repository(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<EvaluationRecord>, PipelineError> {
        Ok(self.store.query_by_repository(owner, name).await?)
    }

    /// The whole stored history, in append order.
    pub async fn list_all(&self) -> Result<Vec<EvaluationRecord>, PipelineError> {
        Ok(self.store.query_all().await?)
    }
}

//! End-to-end contract tests for the evaluation pipeline.
//!
//! Runs the full evaluate -> hash -> anchor -> persist sequence against
//! in-memory and durable stores with well-behaved, flaky, and rejecting
//! ledger fakes.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use proofforge_core::{RepositorySummary, Rule, RuleSet};
use proofforge_ledger::{
    LedgerClient, LedgerError, ProofSubmitter, RetryPolicy, SubmissionOutcome, TopicId,
};
use proofforge_pipeline::{
    EvaluationPipeline, MetadataError, PipelineError, StaticMetadataProvider,
};
use proofforge_store::{JsonFileResultStore, MemoryResultStore, ResultStore};

// ===========================================================================
// Fakes
// ===========================================================================

struct StaticLedger;

#[async_trait]
impl LedgerClient for StaticLedger {
    async fn submit_message(
        &self,
        _topic: &TopicId,
        _message: &[u8],
    ) -> Result<String, LedgerError> {
        Ok("0.0.4812@1724400000.000000001".to_string())
    }
}

struct FailingLedger {
    calls: AtomicU32,
}

#[async_trait]
impl LedgerClient for FailingLedger {
    async fn submit_message(
        &self,
        _topic: &TopicId,
        _message: &[u8],
    ) -> Result<String, LedgerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(LedgerError::Unavailable("connection refused".to_string()))
    }
}

struct RejectingLedger;

#[async_trait]
impl LedgerClient for RejectingLedger {
    async fn submit_message(
        &self,
        _topic: &TopicId,
        _message: &[u8],
    ) -> Result<String, LedgerError> {
        Err(LedgerError::InvalidCredentials("bad key".to_string()))
    }
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 2,
        initial_backoff: Duration::from_millis(1),
        call_timeout: Duration::from_millis(100),
    }
}

fn submitter(client: Arc<dyn LedgerClient>) -> ProofSubmitter {
    ProofSubmitter::new(client, "0.0.4812".parse().unwrap(), fast_policy())
}

fn pipeline_with(
    rules: RuleSet,
    client: Arc<dyn LedgerClient>,
    store: Arc<dyn ResultStore>,
) -> EvaluationPipeline {
    EvaluationPipeline::new(Arc::new(rules), submitter(client), store)
}

fn summary(owner: &str, name: &str, stars: u64, tests: bool, commits: u64) -> RepositorySummary {
    RepositorySummary {
        owner: owner.to_string(),
        name: name.to_string(),
        star_count: stars,
        open_issue_count: 0,
        has_tests: tests,
        commit_count: commits,
        language: None,
        size_kb: None,
        description: None,
    }
}

/// The three-rule table from the product walkthrough.
fn walkthrough_rules() -> RuleSet {
    RuleSet::new(vec![
        Rule::new(|s| s.has_tests, 20, "has tests: +20"),
        Rule::new(|s| s.star_count > 100, 15, "stars > 100: +15"),
        Rule::new(|s| s.commit_count > 10, 10, "active development: +10"),
    ])
}

// ===========================================================================
// Happy path
// ===========================================================================

#[tokio::test]
async fn walkthrough_example_scores_45_in_declared_order() {
    let pipeline = pipeline_with(
        walkthrough_rules(),
        Arc::new(StaticLedger),
        Arc::new(MemoryResultStore::new()),
    );

    let report = pipeline
        .evaluate(summary("octo", "hello", 150, true, 20))
        .await
        .unwrap();

    assert_eq!(report.record.score, 45);
    assert_eq!(
        report.record.trace,
        vec![
            "has tests: +20",
            "stars > 100: +15",
            "active development: +10",
        ]
    );
    assert!(report.record.is_anchored());
    assert_eq!(
        report.record.ledger_transaction_id.as_deref(),
        report.submission.transaction_id()
    );
}

#[tokio::test]
async fn repeated_evaluation_is_deterministic() {
    let pipeline = pipeline_with(
        walkthrough_rules(),
        Arc::new(StaticLedger),
        Arc::new(MemoryResultStore::new()),
    );
    let s = summary("octo", "hello", 150, true, 20);

    let first = pipeline.evaluate(s.clone()).await.unwrap();
    let second = pipeline.evaluate(s).await.unwrap();

    assert_eq!(first.record.score, second.record.score);
    assert_eq!(first.record.trace, second.record.trace);
    assert_eq!(first.record.trace_hash, second.record.trace_hash);
    // Always-append: a fresh historical record each time.
    assert_ne!(first.record.record_id, second.record.record_id);
}

#[tokio::test]
async fn identical_reasoning_hashes_identically_across_repositories() {
    let pipeline = pipeline_with(
        walkthrough_rules(),
        Arc::new(StaticLedger),
        Arc::new(MemoryResultStore::new()),
    );

    let a = pipeline
        .evaluate(summary("octo", "hello", 150, true, 20))
        .await
        .unwrap();
    let b = pipeline
        .evaluate(summary("someone", "else", 101, true, 11))
        .await
        .unwrap();

    assert_ne!(a.record.repository_key, b.record.repository_key);
    assert_eq!(a.record.trace_hash, b.record.trace_hash);
}

// ===========================================================================
// Ledger degradation
// ===========================================================================

#[tokio::test]
async fn degraded_ledger_still_persists_a_record() {
    let client = Arc::new(FailingLedger {
        calls: AtomicU32::new(0),
    });
    let store = Arc::new(MemoryResultStore::new());
    let pipeline = pipeline_with(walkthrough_rules(), client.clone(), store.clone());

    let report = pipeline
        .evaluate(summary("octo", "hello", 150, true, 20))
        .await
        .unwrap();

    assert_eq!(report.submission, SubmissionOutcome::Degraded { attempts: 2 });
    assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    assert!(report.record.ledger_transaction_id.is_none());
    assert_eq!(report.record.score, 45);

    let stored = store.query_all().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0], report.record);
}

#[tokio::test]
async fn rejected_ledger_is_reported_alongside_the_persisted_record() {
    let store = Arc::new(MemoryResultStore::new());
    let pipeline = pipeline_with(walkthrough_rules(), Arc::new(RejectingLedger), store.clone());

    let report = pipeline
        .evaluate(summary("octo", "hello", 150, true, 20))
        .await
        .unwrap();

    assert!(matches!(
        report.submission,
        SubmissionOutcome::Rejected { .. }
    ));
    assert!(report.record.ledger_transaction_id.is_none());
    assert_eq!(store.query_all().await.unwrap().len(), 1);
}

// ===========================================================================
// Concurrency
// ===========================================================================

#[tokio::test]
async fn concurrent_evaluations_get_unique_increasing_ids() {
    let store = Arc::new(MemoryResultStore::new());
    let pipeline = Arc::new(pipeline_with(
        RuleSet::standard(),
        Arc::new(StaticLedger),
        store.clone(),
    ));

    let tasks = (0..12u64).map(|i| {
        let pipeline = Arc::clone(&pipeline);
        tokio::spawn(async move {
            pipeline
                .evaluate(summary(&format!("owner{i}"), "repo", i * 10, i % 2 == 0, i))
                .await
                .unwrap()
                .record
                .record_id
        })
    });

    let mut ids: Vec<u64> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    ids.sort_unstable();

    assert_eq!(ids, (1..=12).collect::<Vec<u64>>());
    assert_eq!(store.query_all().await.unwrap().len(), 12);
}

// ===========================================================================
// Queries and metadata
// ===========================================================================

#[tokio::test]
async fn list_by_repository_is_the_key_matching_subset_in_order() {
    let pipeline = pipeline_with(
        RuleSet::standard(),
        Arc::new(StaticLedger),
        Arc::new(MemoryResultStore::new()),
    );

    pipeline
        .evaluate(summary("octo", "hello", 10, true, 5))
        .await
        .unwrap();
    pipeline
        .evaluate(summary("octo", "world", 10, true, 5))
        .await
        .unwrap();
    pipeline
        .evaluate(summary("octo", "hello", 200, true, 50))
        .await
        .unwrap();

    let all = pipeline.list_all().await.unwrap();
    let hello = pipeline.list_by_repository("octo", "hello").await.unwrap();

    let expected: Vec<_> = all
        .into_iter()
        .filter(|r| r.repository_key == "octo/hello")
        .collect();
    assert_eq!(hello, expected);
    assert_eq!(hello.len(), 2);
    assert!(hello[0].record_id < hello[1].record_id);

    let empty = pipeline.list_by_repository("octo", "missing").await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn metadata_failure_creates_no_record() {
    let store = Arc::new(MemoryResultStore::new());
    let pipeline = pipeline_with(RuleSet::standard(), Arc::new(StaticLedger), store.clone());
    let provider = StaticMetadataProvider::new();

    let err = pipeline
        .evaluate_repository(&provider, "octo", "missing")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Metadata(MetadataError::NotFound { .. })
    ));
    assert!(store.query_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn evaluate_validates_summary_identifiers() {
    let store = Arc::new(MemoryResultStore::new());
    let pipeline = pipeline_with(RuleSet::standard(), Arc::new(StaticLedger), store.clone());

    let err = pipeline
        .evaluate(summary("-bad-", "repo", 1, true, 1))
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::InvalidRepository { .. }));
    assert!(store.query_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_identifiers_are_rejected_before_fetch() {
    let pipeline = pipeline_with(
        RuleSet::standard(),
        Arc::new(StaticLedger),
        Arc::new(MemoryResultStore::new()),
    );
    let provider = StaticMetadataProvider::new();

    let err = pipeline
        .evaluate_repository(&provider, "-bad-", "repo")
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidRepository { .. }));
}

#[tokio::test]
async fn provider_backed_evaluation_round_trips() {
    let pipeline = pipeline_with(
        walkthrough_rules(),
        Arc::new(StaticLedger),
        Arc::new(MemoryResultStore::new()),
    );
    let mut provider = StaticMetadataProvider::new();
    provider.insert(summary("octo", "hello", 150, true, 20));

    let report = pipeline
        .evaluate_repository(&provider, "octo", "hello")
        .await
        .unwrap();
    assert_eq!(report.record.score, 45);
    assert_eq!(report.record.repository_key, "octo/hello");
}

// ===========================================================================
// Durable store end to end
// ===========================================================================

#[tokio::test]
async fn durable_pipeline_history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");

    {
        let store = Arc::new(JsonFileResultStore::open(&path).await.unwrap());
        let pipeline = pipeline_with(walkthrough_rules(), Arc::new(StaticLedger), store);
        pipeline
            .evaluate(summary("octo", "hello", 150, true, 20))
            .await
            .unwrap();
        pipeline
            .evaluate(summary("octo", "hello", 5, false, 1))
            .await
            .unwrap();
    }

    let store = Arc::new(JsonFileResultStore::open(&path).await.unwrap());
    let pipeline = pipeline_with(walkthrough_rules(), Arc::new(StaticLedger), store);

    let history = pipeline.list_by_repository("octo", "hello").await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].score, 45);
    assert_eq!(history[1].score, 0);

    let next = pipeline
        .evaluate(summary("octo", "hello", 150, true, 20))
        .await
        .unwrap();
    assert_eq!(next.record.record_id, 3);
}

//! The consumed metadata-provider seam.
//!
//! Fetching raw repository metadata from a hosting provider is an external
//! concern; the pipeline only depends on this trait and its error taxonomy.

use std::collections::HashMap;

use async_trait::async_trait;
use proofforge_core::RepositorySummary;
use thiserror::Error;

/// Failures the metadata collaborator can report. All of them abort the
/// pipeline before the evaluator runs; no record is created.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// The repository does not exist
    #[error("Repository not found: {key}")]
    NotFound { key: String },

    /// The provider throttled the request
    #[error("Metadata provider rate limited")]
    RateLimited,

    /// The repository exists but is not accessible
    #[error("Repository access forbidden: {key}")]
    Forbidden { key: String },
}

/// Provider of validated repository summaries.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch_summary(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<RepositorySummary, MetadataError>;
}

/// Map-backed provider for tests and offline use.
#[derive(Debug, Default)]
pub struct StaticMetadataProvider {
    summaries: HashMap<String, RepositorySummary>,
}

impl StaticMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a summary under its own `owner/name` key.
    pub fn insert(&mut self, summary: RepositorySummary) {
        self.summaries.insert(summary.repository_key(), summary);
    }
}

#[async_trait]
impl MetadataProvider for StaticMetadataProvider {
    async fn fetch_summary(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<RepositorySummary, MetadataError> {
        let key = format!("{owner}/{name}");
        self.summaries
            .get(&key)
            .cloned()
            .ok_or(MetadataError::NotFound { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(owner: &str, name: &str) -> RepositorySummary {
        RepositorySummary {
            owner: owner.to_string(),
            name: name.to_string(),
            star_count: 1,
            open_issue_count: 0,
            has_tests: true,
            commit_count: 1,
            language: None,
            size_kb: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn static_provider_returns_registered_summaries() {
        let mut provider = StaticMetadataProvider::new();
        provider.insert(summary("octo", "hello"));

        let fetched = provider.fetch_summary("octo", "hello").await.unwrap();
        assert_eq!(fetched.repository_key(), "octo/hello");
    }

    #[tokio::test]
    async fn unknown_repository_is_not_found() {
        let provider = StaticMetadataProvider::new();
        let err = provider.fetch_summary("octo", "missing").await.unwrap_err();
        assert!(matches!(err, MetadataError::NotFound { .. }));
    }
}

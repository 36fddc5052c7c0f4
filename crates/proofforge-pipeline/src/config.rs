//! Environment-driven pipeline configuration.

use std::time::Duration;

use proofforge_ledger::RetryPolicy;
use tracing::info;

/// Knobs for wiring a pipeline at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Ledger relay endpoint; when absent, submissions degrade immediately
    pub ledger_endpoint: Option<String>,

    /// Bearer token for the relay
    pub ledger_token: Option<String>,

    /// Consensus topic reference (`shard.realm.num`)
    pub topic: String,

    /// Backing file for the result store
    pub store_path: String,

    /// Ledger retry bounds
    pub retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            ledger_endpoint: None,
            ledger_token: None,
            topic: "0.0.0".to_string(),
            store_path: ".proofforge/results.json".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Read configuration from `PROOFFORGE_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = PipelineConfig::default();

        let ledger_endpoint = std::env::var("PROOFFORGE_LEDGER_ENDPOINT").ok();
        if ledger_endpoint.is_none() {
            info!("PROOFFORGE_LEDGER_ENDPOINT not set, proofs will not be anchored");
        }

        let retry = RetryPolicy {
            max_attempts: env_u64("PROOFFORGE_LEDGER_ATTEMPTS")
                .map(|n| n as u32)
                .unwrap_or(defaults.retry.max_attempts),
            initial_backoff: env_u64("PROOFFORGE_LEDGER_BACKOFF_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry.initial_backoff),
            call_timeout: env_u64("PROOFFORGE_LEDGER_TIMEOUT_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry.call_timeout),
        };

        PipelineConfig {
            ledger_endpoint,
            ledger_token: std::env::var("PROOFFORGE_LEDGER_TOKEN").ok(),
            topic: std::env::var("PROOFFORGE_TOPIC_ID").unwrap_or(defaults.topic),
            store_path: std::env::var("PROOFFORGE_STORE_PATH").unwrap_or(defaults.store_path),
            retry,
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

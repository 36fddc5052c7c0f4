//! HTTP relay implementation of `LedgerClient`.
//!
//! Posts proof messages to a relay service that performs the actual
//! consensus submission and signing. Status codes are mapped onto the
//! transient/permanent error split the submitter retries against.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::client::LedgerClient;
use crate::error::LedgerError;
use crate::topic::TopicId;

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    transaction_id: String,
}

/// `LedgerClient` over an HTTP relay endpoint.
pub struct HttpLedgerClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpLedgerClient {
    /// Build a client for `base_url`, optionally with a bearer token.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| LedgerError::Unavailable(format!("client init failed: {e}")))?;
        Ok(HttpLedgerClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }
}

#[async_trait]
impl LedgerClient for HttpLedgerClient {
    async fn submit_message(
        &self,
        topic: &TopicId,
        message: &[u8],
    ) -> Result<String, LedgerError> {
        let url = format!("{}/topics/{}/messages", self.base_url, topic);
        debug!("submitting {} bytes to {}", message.len(), url);

        let mut request = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(message.to_vec());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| LedgerError::Unavailable(e.to_string()))?;

        match response.status() {
            status if status.is_success() => {
                let body: SubmitResponse = response
                    .json()
                    .await
                    .map_err(|e| LedgerError::Unavailable(format!("bad relay response: {e}")))?;
                Ok(body.transaction_id)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(
                LedgerError::InvalidCredentials(format!("relay returned {}", response.status())),
            ),
            StatusCode::NOT_FOUND => Err(LedgerError::MalformedTopic(topic.to_string())),
            status => Err(LedgerError::Unavailable(format!(
                "relay returned {status}"
            ))),
        }
    }
}

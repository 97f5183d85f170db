//! GraphQL client with retry
//!
//! A thin client over reqwest that POSTs query documents, unwraps the
//! GraphQL response envelope and retries retryable transport failures with
//! bounded exponential backoff. GraphQL-level errors and malformed payloads
//! are fatal and surface immediately.

use crate::config::{ExporterConfig, RetryPolicy, PREVIEW_ACCEPT_HEADER};
use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// GraphQL response envelope
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<JsonValue>,
    #[serde(default)]
    errors: Option<Vec<EnvelopeError>>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeError {
    message: String,
}

/// GraphQL client bound to one endpoint
///
/// Constructed once by the orchestrator and shared by reference across all
/// export targets.
pub struct GraphqlClient {
    client: Client,
    endpoint: String,
    retry: RetryPolicy,
    timeout: Duration,
}

impl GraphqlClient {
    /// Create a client from the exporter config
    pub fn new(config: &ExporterConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(PREVIEW_ACCEPT_HEADER));
        if let Some(token) = &config.token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|_| Error::config("API token contains invalid header characters"))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .user_agent(format!(
                "{}/{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            retry: config.retry.clone(),
            timeout: config.timeout,
        })
    }

    /// Execute a query once and unwrap the envelope
    pub async fn execute(&self, query: &str, variables: JsonValue) -> Result<JsonValue> {
        let body = json!({ "query": query, "variables": variables });

        let response = match self.client.post(&self.endpoint).json(&body).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return Err(Error::Timeout {
                    timeout_ms: self.timeout.as_millis() as u64,
                })
            }
            Err(e) => return Err(Error::Http(e)),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let envelope: Envelope = response.json().await.map_err(Error::Http)?;
        if let Some(errors) = envelope.errors {
            if !errors.is_empty() {
                let message = errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(Error::graphql(message));
            }
        }

        envelope.data.ok_or_else(|| Error::missing_data("data"))
    }

    /// Execute a query, retrying retryable failures with backoff
    ///
    /// Retries re-request the same variables, so a retried page fetch starts
    /// over from the same cursor.
    pub async fn execute_with_retry(&self, query: &str, variables: JsonValue) -> Result<JsonValue> {
        let mut attempt = 0;
        loop {
            match self.execute(query, variables.clone()).await {
                Ok(data) => {
                    debug!("Query succeeded on attempt {}", attempt + 1);
                    return Ok(data);
                }
                Err(e) if e.is_retryable() => {
                    if attempt >= self.retry.max_retries {
                        warn!("Giving up after {} attempts: {e}", attempt + 1);
                        return Err(Error::MaxRetriesExceeded {
                            max_retries: self.retry.max_retries,
                        });
                    }
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        "Request failed ({e}), attempt {}/{}, retrying in {:?}",
                        attempt + 1,
                        self.retry.max_retries + 1,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl std::fmt::Debug for GraphqlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlClient")
            .field("endpoint", &self.endpoint)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

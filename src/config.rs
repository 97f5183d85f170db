//! Exporter configuration
//!
//! Compile-time defaults and the runtime configuration built from the CLI.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// GraphQL endpoint of the participation platform
pub const DEFAULT_ENDPOINT: &str = "https://granddebat.fr/graphql";

/// Accept header enabling schema previews on the platform API
pub const PREVIEW_ACCEPT_HEADER: &str = "application/vnd.cap-collectif.preview+json";

/// Number of nodes requested per page
pub const PAGE_SIZE: u32 = 100;

/// Separator used to join multiple choice answers
pub const SEPARATOR: &str = "|";

/// Root directory for generated archives; each run gets a timestamped subdir
pub const GENERATED_DIR: &str = "./__generated__";

/// Retry policy for page fetches
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of retries after the initial attempt
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Backoff delay for a given attempt (0-based), doubling up to the cap
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        std::cmp::min(self.initial_backoff * factor, self.max_backoff)
    }
}

/// Configuration for a full export run
#[derive(Debug, Clone)]
pub struct ExporterConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// API token; absence means a public, anonymized export
    pub token: Option<String>,
    /// Nodes per page
    pub page_size: u32,
    /// Request timeout
    pub timeout: Duration,
    /// Retry policy for page fetches
    pub retry: RetryPolicy,
    /// Root directory under which the run directory is created
    pub output_root: PathBuf,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            page_size: PAGE_SIZE,
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
            output_root: PathBuf::from(GENERATED_DIR),
        }
    }
}

impl ExporterConfig {
    /// Create a new config builder
    pub fn builder() -> ExporterConfigBuilder {
        ExporterConfigBuilder::default()
    }

    /// Whether personally identifying fields must be stripped
    ///
    /// A missing token implies a public export, which is always anonymized.
    pub fn anonymize(&self) -> bool {
        self.token.is_none()
    }
}

/// Builder for the exporter config
#[derive(Default)]
pub struct ExporterConfigBuilder {
    config: ExporterConfig,
}

impl ExporterConfigBuilder {
    /// Set the GraphQL endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the API token
    pub fn token(mut self, token: impl Into<Option<String>>) -> Self {
        self.config.token = token.into();
        self
    }

    /// Set the page size
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.config.retry = retry;
        self
    }

    /// Set the output root directory
    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.output_root = root.into();
        self
    }

    /// Validate and build the config
    pub fn build(self) -> Result<ExporterConfig> {
        let url = url::Url::parse(&self.config.endpoint)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::config(format!(
                "Endpoint must be http(s), got '{}'",
                url.scheme()
            )));
        }
        if self.config.page_size == 0 {
            return Err(Error::config("Page size must be greater than zero"));
        }
        Ok(self.config)
    }
}

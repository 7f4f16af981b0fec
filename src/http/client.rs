//! Fetch adapter over a shared `reqwest::Client`.
//!
//! # Responsibilities
//! - Build endpoint URLs from the configured base
//! - Send `GET` with `Accept: application/json` and a request ID
//! - Turn non-2xx into `FetchError::RequestFailed`
//! - Decode bodies into typed payloads
//!
//! # Design Decisions
//! - No retries here; the poll period is the retry
//! - One client per console so the session cookie is replayed on every call
//! - Timeout only when configured; otherwise the transport default applies

use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ConsoleConfig, EnqueueConfig, TargetConfig};
use crate::http::error::FetchError;
use crate::observability::metrics;
use crate::state::{EnqueueAck, StatusSnapshot};

/// Header carrying the per-request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Query parameter holding the job name on the enqueue endpoint.
pub const JOB_PARAM: &str = "job";

/// HTTP client for the status, enqueue and health endpoints.
///
/// Cheap to clone; clones share the connection pool and cookie store.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    client: reqwest::Client,
    base_url: Url,
    status_path: String,
    health_path: String,
    enqueue_path: String,
}

impl ConsoleClient {
    /// Create a client for the given target.
    pub fn new(target: &TargetConfig, enqueue: &EnqueueConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(target.user_agent.as_str());
        if let Some(secs) = target.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            base_url: Url::parse(&target.base_url)?,
            status_path: target.status_path.clone(),
            health_path: target.health_path.clone(),
            enqueue_path: enqueue.path.clone(),
        })
    }

    /// Create a client from a full console configuration.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self, FetchError> {
        Self::new(&config.target, &config.enqueue)
    }

    /// Base URL every endpoint path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        Ok(self.base_url.join(path)?)
    }

    /// URL of the enqueue endpoint for `job`, with the name percent-encoded.
    pub fn enqueue_url(&self, job: &str) -> Result<Url, FetchError> {
        let mut url = self.url_for(&self.enqueue_path)?;
        url.query_pairs_mut().clear().append_pair(JOB_PARAM, job);
        Ok(url)
    }

    /// Fetch the status endpoint.
    pub async fn status(&self) -> Result<StatusSnapshot, FetchError> {
        let url = self.url_for(&self.status_path)?;
        self.fetch_json("status", url).await
    }

    /// Submit a job to the backend queue.
    pub async fn enqueue(&self, job: &str) -> Result<EnqueueAck, FetchError> {
        let url = self.enqueue_url(job)?;
        self.fetch_json("enqueue", url).await
    }

    /// Probe the health endpoint. Any 2xx counts as healthy; the body is ignored.
    pub async fn health(&self) -> Result<(), FetchError> {
        let url = self.url_for(&self.health_path)?;
        let started = Instant::now();
        let result = self.send(url).await.map(|_| ());
        metrics::record_fetch("health", started.elapsed(), &result);
        result
    }

    /// `GET url` and decode the JSON body into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: Url,
    ) -> Result<T, FetchError> {
        let started = Instant::now();
        let result = self.fetch_and_decode(url).await;
        metrics::record_fetch(endpoint, started.elapsed(), &result);
        result
    }

    async fn fetch_and_decode<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let response = self.send(url).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response, FetchError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::debug!(url = %url, request_id = %request_id, "Sending request");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, request_id = %request_id, status = %status, "Non-success status");
            return Err(FetchError::RequestFailed { status });
        }
        Ok(response)
    }
}

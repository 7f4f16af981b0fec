//! One-shot backend health probe.
//!
//! # Responsibilities
//! - Hit the health endpoint once, bounded by a timeout
//! - Classify the result (healthy, non-success, connection error, timeout)

use std::fmt;
use std::time::{Duration, Instant};

use tokio::time;

use crate::http::{ConsoleClient, FetchError};

/// Default bound on a probe when the target has no timeout of its own.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Probe verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    NonSuccess(u16),
    ConnectionError(String),
    Timeout,
}

/// Result of a single probe.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub elapsed: Duration,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

impl fmt::Display for HealthReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed.as_millis();
        match &self.status {
            HealthStatus::Healthy => write!(f, "healthy ({} ms)", ms),
            HealthStatus::NonSuccess(code) => write!(f, "unhealthy: status {} ({} ms)", code, ms),
            HealthStatus::ConnectionError(e) => write!(f, "unhealthy: {} ({} ms)", e, ms),
            HealthStatus::Timeout => write!(f, "unhealthy: timed out after {} ms", ms),
        }
    }
}

/// Probe the target's health endpoint once.
pub async fn probe(client: &ConsoleClient, timeout: Duration) -> HealthReport {
    let started = Instant::now();
    let status = match time::timeout(timeout, client.health()).await {
        Ok(Ok(())) => HealthStatus::Healthy,
        Ok(Err(FetchError::RequestFailed { status })) => {
            tracing::warn!(base = %client.base_url(), status = %status, "Health check failed: non-success status");
            HealthStatus::NonSuccess(status.as_u16())
        }
        Ok(Err(e)) => {
            tracing::warn!(base = %client.base_url(), error = %e, "Health check failed: connection error");
            HealthStatus::ConnectionError(e.to_string())
        }
        Err(_) => {
            tracing::warn!(base = %client.base_url(), "Health check failed: timeout");
            HealthStatus::Timeout
        }
    };

    HealthReport {
        status,
        elapsed: started.elapsed(),
    }
}

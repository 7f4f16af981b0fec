//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the console.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the console.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Where the status and enqueue endpoints live.
    pub target: TargetConfig,

    /// Poll scheduler settings.
    pub poll: PollConfig,

    /// Enqueue action settings.
    pub enqueue: EnqueueConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Backend endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL of the load balancer (e.g., "http://localhost:8080").
    pub base_url: String,

    /// Path of the status endpoint.
    pub status_path: String,

    /// Path probed by the health check.
    pub health_path: String,

    /// Optional request timeout in seconds. `None` leaves the transport default.
    pub timeout_secs: Option<u64>,

    /// User-Agent sent with every request.
    pub user_agent: String,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            status_path: "/api/".to_string(),
            health_path: "/api/healthz".to_string(),
            timeout_secs: None,
            user_agent: concat!("scale-console/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// How results of overlapping poll cycles are reconciled.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResultOrdering {
    /// Last result to arrive wins, whichever cycle issued it.
    #[default]
    Completion,
    /// Results from a cycle older than the last accepted one are dropped.
    Issue,
}

/// Poll scheduler configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollConfig {
    /// Period between refresh cycles in milliseconds.
    pub interval_ms: u64,

    /// Reconciliation policy for overlapping cycles.
    pub result_ordering: ResultOrdering,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1500,
            result_ordering: ResultOrdering::Completion,
        }
    }
}

/// Enqueue action configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EnqueueConfig {
    /// Path of the enqueue endpoint; the job name goes in the `job` query parameter.
    pub path: String,

    /// Initial value of the job-name field.
    pub default_job: String,
}

impl Default for EnqueueConfig {
    fn default() -> Self {
        Self {
            path: "/api/enqueue".to_string(),
            default_job: "demo-job".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log format for stderr output.
    pub log_format: LogFormat,

    /// Default filter when `RUST_LOG` is not set.
    pub log_filter: String,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Pretty,
            log_filter: "scale_console=info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9091".to_string(),
        }
    }
}

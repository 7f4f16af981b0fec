//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Fetch adapter, poll scheduler, enqueue handler produce:
//!     → logging.rs (structured log events on stderr)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Terminal / log aggregation
//!     → Metrics endpoint (Prometheus scrape, opt-in)
//! ```
//!
//! # Design Decisions
//! - Logs never go to stdout; stdout belongs to the rendered console
//! - Metric calls are no-ops until an exporter is installed
//! - Request ID attached to every outgoing call for backend correlation

pub mod logging;
pub mod metrics;

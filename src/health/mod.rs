//! Backend health checking.
//!
//! The console probes the target once at start-up and the CLI exposes the
//! same probe as `health`. Poll cycles do not consult it; a down backend
//! simply shows up as a poll error.

pub mod probe;

pub use probe::{probe, HealthReport, HealthStatus, DEFAULT_PROBE_TIMEOUT};

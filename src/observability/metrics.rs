//! Metrics collection and exposition.
//!
//! # Metrics
//! - `console_fetch_total` (counter): requests by endpoint, outcome
//! - `console_fetch_duration_seconds` (histogram): latency by endpoint
//! - `console_poll_cycles_total` (counter): completed poll cycles by outcome
//! - `console_poll_in_flight` (gauge): poll cycles awaiting a response
//! - `console_enqueue_total` (counter): enqueue submissions by outcome

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::http::FetchError;

/// Install the Prometheus recorder and HTTP listener.
///
/// Must be called from inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

fn outcome<T>(result: &Result<T, FetchError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    }
}

/// Record one fetch against `endpoint`.
pub fn record_fetch<T>(endpoint: &'static str, elapsed: Duration, result: &Result<T, FetchError>) {
    counter!("console_fetch_total", "endpoint" => endpoint, "outcome" => outcome(result)).increment(1);
    histogram!("console_fetch_duration_seconds", "endpoint" => endpoint).record(elapsed.as_secs_f64());
}

/// A poll cycle started.
pub fn poll_started() {
    gauge!("console_poll_in_flight").increment(1.0);
}

/// A poll cycle resolved.
pub fn poll_finished<T>(result: &Result<T, FetchError>) {
    gauge!("console_poll_in_flight").decrement(1.0);
    counter!("console_poll_cycles_total", "outcome" => outcome(result)).increment(1);
}

/// An enqueue submission resolved.
pub fn record_enqueue<T>(result: &Result<T, FetchError>) {
    counter!("console_enqueue_total", "outcome" => outcome(result)).increment(1);
}

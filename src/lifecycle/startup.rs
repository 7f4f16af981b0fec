//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when enabled
//! - Build the shared HTTP client
//! - Probe backend health once (informational)
//! - Mount the poll scheduler and wire the enqueue handler
//!
//! # Design Decisions
//! - Only client construction is fatal; an unhealthy backend is logged and
//!   left for the poll loop to report
//! - Subsystems initialize in order, not concurrently

use std::time::Duration;

use crate::actions::{notification, EnqueueHandler, NotificationQueue};
use crate::config::ConsoleConfig;
use crate::health::{self, DEFAULT_PROBE_TIMEOUT};
use crate::http::{ConsoleClient, FetchError};
use crate::observability::metrics;
use crate::poll::{PollHandle, PollScheduler};

/// A running console: mounted poller, enqueue handler, notification queue.
///
/// Fields are public so the presentation loop can borrow them independently.
pub struct Console {
    pub config: ConsoleConfig,
    pub client: ConsoleClient,
    pub poller: PollHandle,
    pub enqueue: EnqueueHandler<ConsoleClient>,
    pub notifications: NotificationQueue,
}

impl Console {
    /// Initialize every subsystem and mount the poller.
    ///
    /// `config` is expected to be validated already.
    pub async fn start(config: ConsoleConfig) -> Result<Self, FetchError> {
        if config.observability.metrics_enabled {
            match config.observability.metrics_address.parse() {
                Ok(addr) => metrics::init_metrics(addr),
                Err(_) => tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                ),
            }
        }

        let client = ConsoleClient::from_config(&config)?;
        tracing::info!(
            base_url = %client.base_url(),
            interval_ms = config.poll.interval_ms,
            ordering = ?config.poll.result_ordering,
            "Configuration loaded"
        );

        let probe_timeout = config
            .target
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_PROBE_TIMEOUT);
        let report = health::probe(&client, probe_timeout).await;
        if report.is_healthy() {
            tracing::info!(report = %report, "Backend reachable");
        } else {
            tracing::warn!(report = %report, "Backend not healthy; polling anyway");
        }

        let poller = PollScheduler::new(client.clone(), &config.poll).mount();
        let (notifier, notifications) = notification::channel();
        let enqueue = EnqueueHandler::new(client.clone(), notifier);

        Ok(Self {
            config,
            client,
            poller,
            enqueue,
            notifications,
        })
    }

    /// Unmount the poller and hand back any notifications nobody consumed.
    pub async fn stop(self) -> Vec<crate::actions::Notification> {
        let Console {
            poller,
            mut notifications,
            ..
        } = self;
        poller.unmount().await;
        notifications.drain()
    }
}

//! Periodic status refresh.
//!
//! # States
//! ```text
//! Idle ──mount──▶ Running ──unmount / drop──▶ Idle
//!                    │
//!                    └─ tick (immediately, then every interval) → spawn refresh cycle
//! ```
//!
//! # Design Decisions
//! - Each tick spawns its cycle and returns to the timer; cycles may overlap
//! - Teardown cancels the timer, not the cycles already in flight
//! - The model is disposed at teardown so late completions are inert
//! - Dropping the handle tears down just like `unmount`

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::config::PollConfig;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::poll::source::StatusSource;
use crate::state::{CycleOutcome, StatusModel, ViewState};

/// Poll scheduler in its Idle state.
pub struct PollScheduler<S> {
    source: Arc<S>,
    model: Arc<StatusModel>,
    interval: Duration,
}

impl<S: StatusSource> PollScheduler<S> {
    /// Create an idle scheduler polling `source`.
    pub fn new(source: S, config: &PollConfig) -> Self {
        Self {
            source: Arc::new(source),
            model: Arc::new(StatusModel::new(config.result_ordering)),
            interval: Duration::from_millis(config.interval_ms),
        }
    }

    /// The view-model this scheduler will write to.
    pub fn model(&self) -> &Arc<StatusModel> {
        &self.model
    }

    /// Transition to Running: refresh now, then every interval.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn mount(self) -> PollHandle {
        let shutdown = Shutdown::new();
        let stop = shutdown.subscribe();

        tracing::info!(interval_ms = self.interval.as_millis() as u64, "Poll scheduler mounted");

        let task = tokio::spawn(run(self.source, self.model.clone(), self.interval, stop));

        PollHandle {
            model: self.model,
            shutdown,
            task: Some(task),
        }
    }
}

/// A mounted scheduler. Owns the timer task.
pub struct PollHandle {
    model: Arc<StatusModel>,
    shutdown: Shutdown,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Subscribe to view state changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.model.subscribe()
    }

    /// Current view state.
    pub fn state(&self) -> ViewState {
        self.model.current()
    }

    /// The underlying model.
    pub fn model(&self) -> &Arc<StatusModel> {
        &self.model
    }

    /// Transition to Idle and wait for the timer task to exit.
    pub async fn unmount(mut self) {
        self.shutdown.trigger();
        self.model.dispose();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Poll timer task ended abnormally");
            }
        }
        tracing::info!(cycles = self.model.cycles_started(), "Poll scheduler unmounted");
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.shutdown.trigger();
            self.model.dispose();
            task.abort();
        }
    }
}

async fn run<S: StatusSource>(
    source: Arc<S>,
    model: Arc<StatusModel>,
    period: Duration,
    mut stop: broadcast::Receiver<()>,
) {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = stop.recv() => {
                tracing::debug!("Poll timer received shutdown signal, exiting loop");
                break;
            }
            _ = ticker.tick() => {
                let source = source.clone();
                let model = model.clone();
                tokio::spawn(async move {
                    refresh(source.as_ref(), &model).await;
                });
            }
        }
    }
}

/// Run one poll cycle against `model`.
pub async fn refresh<S: StatusSource>(source: &S, model: &StatusModel) -> CycleOutcome {
    let ticket = model.begin_cycle();
    metrics::poll_started();

    let result = source.fetch_status().await;
    metrics::poll_finished(&result);

    if let Err(e) = &result {
        tracing::warn!(cycle = ticket.number(), kind = e.kind(), error = %e, "Status poll failed");
    }

    let outcome = model.complete_cycle(ticket, result);
    match outcome {
        CycleOutcome::Applied => {
            if let Some(snapshot) = model.current().snapshot {
                tracing::debug!(
                    cycle = ticket.number(),
                    served_by = %snapshot.served_by,
                    session_count = snapshot.session_count,
                    global_count = snapshot.global_count,
                    "Status updated"
                );
            }
        }
        CycleOutcome::Stale => {
            tracing::debug!(cycle = ticket.number(), "Dropped out-of-order status");
        }
        CycleOutcome::Discarded => {
            tracing::debug!(cycle = ticket.number(), "Status arrived after unmount");
        }
        CycleOutcome::Failed => {}
    }
    outcome
}

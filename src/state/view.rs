//! Status view-model and poll-cycle reconciliation.
//!
//! # State
//! ```text
//! ViewState { snapshot: Option<StatusSnapshot>, is_loading, last_error }
//!
//! begin_cycle:    is_loading = true
//! complete Ok:    snapshot = payload, last_error = None, is_loading = false
//! complete Err:   last_error = err.to_string(), snapshot kept, is_loading = false
//! ```
//!
//! # Design Decisions
//! - An error never clears the last good snapshot (stale beats blank)
//! - Overlapping cycles are not serialized; by default the last completion wins
//! - `ResultOrdering::Issue` drops results (success or failure) older than the
//!   last accepted one
//! - Completions after `dispose` are discarded without touching state

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use tokio::sync::watch;

use crate::config::ResultOrdering;
use crate::http::FetchError;
use crate::state::StatusSnapshot;

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Last successfully decoded status, if any cycle has succeeded.
    pub snapshot: Option<StatusSnapshot>,
    /// True between a cycle's start and its resolution.
    pub is_loading: bool,
    /// Description of the most recent failure, cleared by the next success.
    pub last_error: Option<String>,
}

impl ViewState {
    /// State at mount: loading, nothing to show yet.
    pub fn mounted() -> Self {
        Self {
            snapshot: None,
            is_loading: true,
            last_error: None,
        }
    }
}

/// Handle for one poll cycle, returned by [`StatusModel::begin_cycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CycleTicket(u64);

impl CycleTicket {
    /// 1-based sequence number of the cycle.
    pub fn number(&self) -> u64 {
        self.0
    }
}

/// How a completed cycle was reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Snapshot replaced, error cleared.
    Applied,
    /// Error recorded, snapshot kept.
    Failed,
    /// Result older than an already accepted one; only `is_loading` changed.
    Stale,
    /// Arrived after dispose; nothing changed.
    Discarded,
}

/// Owner of the view state for one mounted console.
///
/// Writers go through `begin_cycle`/`complete_cycle`; readers subscribe to a
/// `watch` channel and see every change.
#[derive(Debug)]
pub struct StatusModel {
    tx: watch::Sender<ViewState>,
    ordering: ResultOrdering,
    issued: AtomicU64,
    accepted: AtomicU64,
    disposed: AtomicBool,
}

impl StatusModel {
    /// Create the model in its mounted state.
    pub fn new(ordering: ResultOrdering) -> Self {
        let (tx, _) = watch::channel(ViewState::mounted());
        Self {
            tx,
            ordering,
            issued: AtomicU64::new(0),
            accepted: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        }
    }

    /// Subscribe to view state changes.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.tx.subscribe()
    }

    /// Copy of the current view state.
    pub fn current(&self) -> ViewState {
        self.tx.borrow().clone()
    }

    /// Number of cycles started so far.
    pub fn cycles_started(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }

    /// Whether `dispose` has been called.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Start a cycle: mark loading and hand out its ticket.
    pub fn begin_cycle(&self) -> CycleTicket {
        let ticket = CycleTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1);
        if !self.is_disposed() {
            self.tx.send_modify(|state| state.is_loading = true);
        }
        ticket
    }

    /// Reconcile a cycle's result into the view state.
    pub fn complete_cycle(
        &self,
        ticket: CycleTicket,
        result: Result<StatusSnapshot, FetchError>,
    ) -> CycleOutcome {
        if self.is_disposed() {
            return CycleOutcome::Discarded;
        }

        let mut outcome = CycleOutcome::Discarded;
        self.tx.send_modify(|state| {
            let last = self.accepted.load(Ordering::SeqCst);
            outcome = if self.ordering == ResultOrdering::Issue && ticket.0 < last {
                CycleOutcome::Stale
            } else {
                self.accepted.store(ticket.0, Ordering::SeqCst);
                match result {
                    Ok(snapshot) => {
                        state.snapshot = Some(snapshot);
                        state.last_error = None;
                        CycleOutcome::Applied
                    }
                    Err(e) => {
                        state.last_error = Some(e.to_string());
                        CycleOutcome::Failed
                    }
                }
            };
            state.is_loading = false;
        });
        outcome
    }

    /// Stop accepting writes. Idempotent.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }
}

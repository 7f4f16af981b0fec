//! Enqueue action handler.
//!
//! # States
//! ```text
//! Idle ──submit──▶ Submitting ──response / failure──▶ Idle
//! ```
//! Re-entrant: every submit is its own cycle, concurrent submits are allowed
//! and counted. The handler never touches the status view-model; its only
//! output is one notification per submit.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::actions::notification::{Notification, Notifier};
use crate::http::{ConsoleClient, FetchError};
use crate::observability::metrics;
use crate::state::{EnqueueAck, JobId};

/// A job the operator asked for. The name is passed through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRequest {
    pub name: String,
}

impl JobRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Result of one submit. Surfaced once as a notification, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnqueueOutcome {
    Enqueued { id: JobId },
    Failed { reason: String },
}

impl EnqueueOutcome {
    /// Notification text for this outcome.
    pub fn to_notification(&self) -> Notification {
        match self {
            EnqueueOutcome::Enqueued { id } => Notification::success(format!("Enqueued: {}", id)),
            EnqueueOutcome::Failed { reason } => {
                Notification::failure(format!("Failed to enqueue: {}", reason))
            }
        }
    }
}

impl From<Result<EnqueueAck, FetchError>> for EnqueueOutcome {
    fn from(result: Result<EnqueueAck, FetchError>) -> Self {
        match result {
            Ok(ack) => EnqueueOutcome::Enqueued { id: ack.enqueued },
            Err(e) => EnqueueOutcome::Failed { reason: e.to_string() },
        }
    }
}

/// Where submitted jobs go.
pub trait JobSink: Send + Sync + 'static {
    fn enqueue_job(&self, name: &str) -> impl Future<Output = Result<EnqueueAck, FetchError>> + Send;
}

impl JobSink for ConsoleClient {
    fn enqueue_job(&self, name: &str) -> impl Future<Output = Result<EnqueueAck, FetchError>> + Send {
        let client = self.clone();
        let name = name.to_string();
        async move { client.enqueue(&name).await }
    }
}

/// Handler phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    /// At least one submit awaiting a response.
    Submitting(usize),
}

/// Turns operator input into enqueue requests and notifications.
pub struct EnqueueHandler<S> {
    sink: Arc<S>,
    notifier: Notifier,
    in_flight: Arc<AtomicUsize>,
}

impl<S> Clone for EnqueueHandler<S> {
    fn clone(&self) -> Self {
        Self {
            sink: self.sink.clone(),
            notifier: self.notifier.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<S: JobSink> EnqueueHandler<S> {
    pub fn new(sink: S, notifier: Notifier) -> Self {
        Self {
            sink: Arc::new(sink),
            notifier,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> SubmitPhase {
        match self.in_flight.load(Ordering::SeqCst) {
            0 => SubmitPhase::Idle,
            n => SubmitPhase::Submitting(n),
        }
    }

    /// Submit `job` and wait for its outcome. Notifies exactly once.
    pub async fn submit(&self, job: JobRequest) -> EnqueueOutcome {
        let guard = SubmitGuard::enter(self.in_flight.clone());
        self.run_submit(job, guard).await
    }

    /// Fire-and-forget submit on the runtime.
    ///
    /// The submit counts as in flight from the moment this returns.
    pub fn spawn_submit(&self, job: JobRequest) -> JoinHandle<EnqueueOutcome> {
        let guard = SubmitGuard::enter(self.in_flight.clone());
        let handler = self.clone();
        tokio::spawn(async move { handler.run_submit(job, guard).await })
    }

    async fn run_submit(&self, job: JobRequest, _guard: SubmitGuard) -> EnqueueOutcome {
        tracing::info!(job = %job.name, "Enqueueing job");

        let result = self.sink.enqueue_job(&job.name).await;
        metrics::record_enqueue(&result);

        match &result {
            Ok(ack) => tracing::info!(job = %job.name, id = %ack.enqueued, "Job enqueued"),
            Err(e) => tracing::warn!(job = %job.name, kind = e.kind(), error = %e, "Enqueue failed"),
        }

        let outcome = EnqueueOutcome::from(result);
        self.notifier.notify(outcome.to_notification());
        outcome
    }
}

/// Counts a submit as in flight for as long as it lives.
struct SubmitGuard {
    in_flight: Arc<AtomicUsize>,
}

impl SubmitGuard {
    fn enter(in_flight: Arc<AtomicUsize>) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self { in_flight }
    }
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Input prefix that sets the job field verbatim.
pub const VERBATIM_PREFIX: char = '=';

/// The editable job-name field. Starts at the configured default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobField {
    value: String,
}

impl JobField {
    pub fn new(initial: impl Into<String>) -> Self {
        Self { value: initial.into() }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Apply one line of operator input and return the request to submit.
    ///
    /// A blank line resubmits the current value. A line starting with
    /// [`VERBATIM_PREFIX`] sets the field to the rest of the line as-is, so
    /// empty and whitespace-only names can be sent. Anything else replaces it.
    pub fn submit_line(&mut self, line: &str) -> JobRequest {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(verbatim) = line.strip_prefix(VERBATIM_PREFIX) {
            self.value = verbatim.to_string();
        } else if !line.trim().is_empty() {
            self.value = line.to_string();
        }
        JobRequest::new(self.value.clone())
    }
}

//! Operator-triggered actions.
//!
//! # Data Flow
//! ```text
//! input line
//!     → enqueue.rs JobField (current job name)
//!     → EnqueueHandler::submit → JobSink (GET /api/enqueue?job=...)
//!     → notification.rs (one-shot message for the presentation layer)
//! ```
//!
//! # Design Decisions
//! - Decoupled from the poll scheduler: no shared state, no locks
//! - No guard against concurrent submits

pub mod enqueue;
pub mod notification;

pub use enqueue::{EnqueueHandler, EnqueueOutcome, JobField, JobRequest, JobSink, SubmitPhase};
pub use notification::{Notification, NotificationKind, NotificationQueue, Notifier};

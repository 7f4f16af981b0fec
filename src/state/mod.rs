//! Console state.
//!
//! # Data Flow
//! ```text
//! poll cycle result
//!     → view.rs (StatusModel::complete_cycle)
//!     → watch channel
//!     → render (read-only)
//! ```
//!
//! snapshot.rs holds the wire payloads decoded by the fetch adapter.

pub mod snapshot;
pub mod view;

pub use snapshot::{EnqueueAck, JobId, StatusSnapshot};
pub use view::{CycleOutcome, CycleTicket, StatusModel, ViewState};

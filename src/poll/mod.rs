//! Poll scheduler subsystem.
//!
//! # Data Flow
//! ```text
//! mount
//!     → scheduler.rs timer (immediate tick, then fixed period)
//!     → refresh(): begin_cycle → StatusSource::fetch_status → complete_cycle
//!     → StatusModel watch channel
//! unmount / drop
//!     → Shutdown broadcast stops the timer, model disposed
//! ```

pub mod scheduler;
pub mod source;

pub use scheduler::{refresh, PollHandle, PollScheduler};
pub use source::StatusSource;

//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Logging/metrics → Client → Health probe → Mount poller
//!
//! Shutdown (shutdown.rs):
//!     Signal or input EOF → Unmount poller → Drain notifications → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then observability, then network
//! - The timer is released on every exit path (unmount or drop)

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::Console;

//! HTTP fetch adapter.
//!
//! # Data Flow
//! ```text
//! caller (poll cycle / enqueue / health probe)
//!     → client.rs (build URL, GET, status check)
//!     → serde_json (typed decode)
//!     → Result<T, FetchError>
//! ```
//!
//! # Design Decisions
//! - Three failure kinds: non-2xx, transport, malformed body
//! - Failures are values; callers decide how to surface them

pub mod client;
pub mod error;

pub use client::ConsoleClient;
pub use error::FetchError;

//! Load-distribution console.
//!
//! Polls a load-balanced service's status endpoint to show which backend
//! instance answered, with per-session and global counters, and submits
//! named jobs to the service's queue.

pub mod actions;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod poll;
pub mod render;
pub mod state;

pub use config::ConsoleConfig;
pub use http::ConsoleClient;
pub use lifecycle::{Console, Shutdown};
pub use poll::{PollHandle, PollScheduler};
pub use state::{StatusSnapshot, ViewState};

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → CLI overrides (--url, --interval-ms)
//!     → ConsoleConfig (validated, immutable)
//!     → cloned into each subsystem at mount
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no hot reload
//! - All fields have defaults so the console runs without a file
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError};
pub use schema::ConsoleConfig;
pub use schema::{EnqueueConfig, LogFormat, ObservabilityConfig, PollConfig, ResultOrdering, TargetConfig};
pub use validation::{validate_config, ValidationError};

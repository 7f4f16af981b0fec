//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval > 0, timeouts > 0)
//! - Check that the base URL and metrics address parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ConsoleConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is handed to any subsystem

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ConsoleConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("target.base_url {0:?} is not a valid http(s) URL")]
    InvalidBaseUrl(String),

    #[error("{field} must start with '/' (got {value:?})")]
    RelativePath { field: &'static str, value: String },

    #[error("poll.interval_ms must be greater than zero")]
    ZeroInterval,

    #[error("target.timeout_secs must be greater than zero when set")]
    ZeroTimeout,

    #[error("observability.metrics_address {0:?} is not a socket address")]
    InvalidMetricsAddress(String),
}

/// Validate a parsed configuration, collecting every error.
pub fn validate_config(config: &ConsoleConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match Url::parse(&config.target.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::InvalidBaseUrl(config.target.base_url.clone())),
    }

    let paths = [
        ("target.status_path", &config.target.status_path),
        ("target.health_path", &config.target.health_path),
        ("enqueue.path", &config.enqueue.path),
    ];
    for (field, value) in paths {
        if !value.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                field,
                value: value.clone(),
            });
        }
    }

    if config.poll.interval_ms == 0 {
        errors.push(ValidationError::ZeroInterval);
    }

    if config.target.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

//! Wire payloads decoded at the HTTP boundary.
//!
//! Both types reject missing fields instead of rendering blanks; the fetch
//! adapter maps a decode failure to `FetchError::MalformedResponse`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One reading of the status endpoint.
///
/// Immutable once received. Each successful poll replaces the previous
/// snapshot wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Backend instance that produced the response.
    pub served_by: String,
    /// Session identifier assigned by the backend (cookie `sid`).
    pub session_id: String,
    /// Requests seen for this session.
    pub session_count: u64,
    /// Requests seen across every session and instance.
    pub global_count: u64,
    /// Per-response random value some backends attach.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_noise: Option<u64>,
}

/// Identifier the queue hands back for an enqueued job.
///
/// Backends differ on whether this is a string or a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JobId {
    Text(String),
    Number(i64),
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobId::Text(s) => f.write_str(s),
            JobId::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Success body of the enqueue endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnqueueAck {
    pub enqueued: JobId,
}

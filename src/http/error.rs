//! Fetch failure conditions.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by the fetch adapter.
///
/// The `Display` text is what ends up in view state and notifications, so
/// `RequestFailed` stays deliberately coarse. The status code is kept on the
/// variant for logs and tests only.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport succeeded but the response status was not 2xx.
    #[error("Request failed")]
    RequestFailed { status: StatusCode },

    /// The transport itself failed (connect, DNS, timeout, body read).
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not the JSON shape the endpoint promises.
    #[error("Malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The request URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    /// Short label used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::RequestFailed { .. } => "request_failed",
            FetchError::Transport(_) => "transport",
            FetchError::MalformedResponse(_) => "malformed",
            FetchError::InvalidUrl(_) => "invalid_url",
        }
    }

    /// Status code of a `RequestFailed`, if that is what this is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::RequestFailed { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_failed_message_is_opaque() {
        let err = FetchError::RequestFailed { status: StatusCode::INTERNAL_SERVER_ERROR };
        assert_eq!(err.to_string(), "Request failed");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert_eq!(err.kind(), "request_failed");
    }

    #[test]
    fn malformed_message_names_the_decoder_error() {
        let decode = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = FetchError::from(decode);
        assert!(err.to_string().starts_with("Malformed response:"));
        assert_eq!(err.status(), None);
    }
}

//! Where a poll cycle gets its status from.

use std::future::Future;

use crate::http::{ConsoleClient, FetchError};
use crate::state::StatusSnapshot;

/// Something that can produce one status reading.
///
/// `ConsoleClient` is the production source; tests script their own.
pub trait StatusSource: Send + Sync + 'static {
    fn fetch_status(&self) -> impl Future<Output = Result<StatusSnapshot, FetchError>> + Send;
}

impl StatusSource for ConsoleClient {
    fn fetch_status(&self) -> impl Future<Output = Result<StatusSnapshot, FetchError>> + Send {
        self.status()
    }
}

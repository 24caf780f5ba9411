//! Progress sink for the watch loop.

use crate::error::WatchError;
use crate::session::WatchSession;
use skyport_types::ResourceStatus;

/// Receives the watch's progress and result lines.
///
/// The watcher calls exactly one of `succeeded` / `failed` before returning,
/// after any number of `progress` calls.
pub trait WatchReporter: Send + Sync {
    /// A poll observed a non-terminal status.
    fn progress(&self, session: &WatchSession, status: &ResourceStatus);

    /// The resource reached a success status.
    fn succeeded(&self, session: &WatchSession, status: &ResourceStatus);

    /// The watch ended without success.
    fn failed(&self, session: &WatchSession, error: &WatchError);
}

/// Discards everything. For callers that only care about the returned result.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl WatchReporter for SilentReporter {
    fn progress(&self, _session: &WatchSession, _status: &ResourceStatus) {}

    fn succeeded(&self, _session: &WatchSession, _status: &ResourceStatus) {}

    fn failed(&self, _session: &WatchSession, _error: &WatchError) {}
}

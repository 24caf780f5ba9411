//! Per-invocation watch state.

use skyport_types::{EnvironmentId, ResourceRef};
use std::time::Duration;
use tokio::time::Instant;

/// One watch of one resource. Lives for the duration of a single command.
#[derive(Debug, Clone)]
pub struct WatchSession {
    target: ResourceRef,
    environment_id: EnvironmentId,
    poll_interval: Duration,
    started_at: Instant,
    polls: u32,
}

impl WatchSession {
    pub fn start(target: ResourceRef, environment_id: EnvironmentId, poll_interval: Duration) -> Self {
        Self {
            target,
            environment_id,
            poll_interval,
            started_at: Instant::now(),
            polls: 0,
        }
    }

    pub fn target(&self) -> &ResourceRef {
        &self.target
    }

    pub fn environment_id(&self) -> &EnvironmentId {
        &self.environment_id
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Status fetches made so far
    pub fn polls(&self) -> u32 {
        self.polls
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub(crate) fn record_poll(&mut self) {
        self.polls += 1;
    }
}

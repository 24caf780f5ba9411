//! The polling state machine.

use crate::classifier::{classify_for, Classification};
use crate::error::WatchError;
use crate::reporter::WatchReporter;
use crate::session::WatchSession;
use crate::source::{SourceError, StatusSource};
use skyport_types::{Action, EnvironmentId, ResourceKind, ResourceRef, ResourceStatus};
use std::time::Duration;
use tracing::{debug, info, warn};

/// States of a watch session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Waiting for a terminal status
    Polling,
    /// The resource reached a success status
    Succeeded,
    /// The resource reached a failure status or disappeared
    Failed,
    /// The watch itself broke (fetch error or deadline)
    Errored,
}

/// Watch loop tuning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Constant delay before every poll
    pub poll_interval: Duration,

    /// Give up after this long; `None` waits indefinitely
    pub max_duration: Option<Duration>,
}

impl WatchConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_max_duration(mut self, max_duration: Option<Duration>) -> Self {
        self.max_duration = max_duration;
        self
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
            max_duration: None,
        }
    }
}

/// Result of a watch that ended in `Succeeded`
#[derive(Debug, Clone)]
pub struct WatchReport {
    pub resource: ResourceRef,
    /// The terminal status that ended the watch
    pub status: ResourceStatus,
    pub polls: u32,
    pub elapsed: Duration,
}

impl WatchReport {
    pub fn state(&self) -> WatchState {
        WatchState::Succeeded
    }
}

/// Polls a resource until it settles
pub struct OperationWatcher<'a, S: ?Sized> {
    source: &'a S,
    config: WatchConfig,
}

impl<'a, S: StatusSource + ?Sized> OperationWatcher<'a, S> {
    pub fn new(source: &'a S, config: WatchConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Watch `action` on `target`, owned by `environment_id`, until it
    /// reaches a terminal state.
    ///
    /// Only a success status that `action` produces yields `Ok`; see
    /// [`classify_for`](crate::classifier::classify_for). A failure status, a vanished
    /// resource, a fetch error or an expired deadline all return an error; the
    /// reporter has been told either way.
    pub async fn watch(
        &self,
        target: &ResourceRef,
        action: Action,
        environment_id: &EnvironmentId,
        reporter: &dyn WatchReporter,
    ) -> Result<WatchReport, WatchError> {
        let mut session = WatchSession::start(
            target.clone(),
            environment_id.clone(),
            self.config.poll_interval,
        );
        info!(
            resource = %target,
            %action,
            environment = %environment_id,
            interval_ms = self.config.poll_interval.as_millis() as u64,
            "watching operation"
        );

        loop {
            tokio::time::sleep(self.config.poll_interval).await;

            if let Some(max) = self.config.max_duration {
                if session.elapsed() >= max {
                    let error = WatchError::TimedOut {
                        resource: target.clone(),
                        elapsed: session.elapsed(),
                    };
                    return Err(self.finish_with(&session, reporter, error));
                }
            }

            session.record_poll();
            let status = match self.fetch(&session).await {
                Ok(status) => status,
                Err(SourceError::NotFound(detail)) => {
                    debug!(resource = %target, %detail, "resource vanished");
                    let error = WatchError::NotFoundDuringWatch {
                        resource: target.clone(),
                    };
                    return Err(self.finish_with(&session, reporter, error));
                }
                Err(source_error) => {
                    return Err(self.finish_with(
                        &session,
                        reporter,
                        WatchError::Transport(source_error),
                    ));
                }
            };

            let classification = classify_for(action, &status.state);
            debug!(
                resource = %target,
                poll = session.polls(),
                state = %status.state,
                ?classification,
                "polled"
            );

            match classification {
                Classification::Success => {
                    reporter.succeeded(&session, &status);
                    info!(resource = %target, state = %status.state, polls = session.polls(), "operation succeeded");
                    return Ok(WatchReport {
                        resource: target.clone(),
                        status,
                        polls: session.polls(),
                        elapsed: session.elapsed(),
                    });
                }
                Classification::Failure => {
                    let error = WatchError::RemoteFailure {
                        resource: target.clone(),
                        message: status.message.clone().filter(|m| !m.is_empty()),
                        status: status.state,
                    };
                    return Err(self.finish_with(&session, reporter, error));
                }
                Classification::Running => {
                    if status.state.is_unknown() {
                        warn!(resource = %target, state = %status.state, "unrecognised status, still waiting");
                    }
                    reporter.progress(&session, &status);
                }
            }
        }
    }

    async fn fetch(&self, session: &WatchSession) -> Result<ResourceStatus, SourceError> {
        let target = session.target();

        if target.kind == ResourceKind::Environment {
            let snapshot = self
                .source
                .fetch_environment_statuses(session.environment_id())
                .await?;
            return Ok(snapshot.environment);
        }

        if target.kind.uses_environment_snapshot() {
            // Refreshed every cycle; never reuse a previous snapshot.
            let snapshot = self
                .source
                .fetch_environment_statuses(session.environment_id())
                .await?;
            return snapshot
                .find(target.kind, target.id.as_str())
                .cloned()
                .ok_or_else(|| SourceError::NotFound(target.to_string()));
        }

        self.source.fetch_resource_status(target).await
    }

    fn finish_with(
        &self,
        session: &WatchSession,
        reporter: &dyn WatchReporter,
        error: WatchError,
    ) -> WatchError {
        warn!(resource = %session.target(), polls = session.polls(), %error, "watch ended");
        reporter.failed(session, &error);
        error
    }
}

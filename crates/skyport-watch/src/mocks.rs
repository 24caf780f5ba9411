use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use skyport_types::{EnvironmentId, EnvironmentStatusSet, ResourceRef, ResourceStatus, StatusCode};

use crate::error::WatchError;
use crate::reporter::WatchReporter;
use crate::session::WatchSession;
use crate::source::{SourceError, StatusSource};

/// Scripted status source for testing.
///
/// Responses are queued per method and handed out in order. Once a queue is
/// drained every further call fails with a transport error, so a test that
/// polls more often than it scripted fails loudly instead of hanging.
#[derive(Default)]
pub struct MockStatusSource {
    resources: Mutex<VecDeque<Result<ResourceStatus, SourceError>>>,
    environments: Mutex<VecDeque<Result<EnvironmentStatusSet, SourceError>>>,
    resource_calls: AtomicUsize,
    environment_calls: AtomicUsize,
}

impl MockStatusSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then_resource(self, status: ResourceStatus) -> Self {
        self.resources.lock().unwrap().push_back(Ok(status));
        self
    }

    pub fn then_resource_error(self, error: SourceError) -> Self {
        self.resources.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn then_environment(self, snapshot: EnvironmentStatusSet) -> Self {
        self.environments.lock().unwrap().push_back(Ok(snapshot));
        self
    }

    pub fn then_environment_error(self, error: SourceError) -> Self {
        self.environments.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn resource_calls(&self) -> usize {
        self.resource_calls.load(Ordering::SeqCst)
    }

    pub fn environment_calls(&self) -> usize {
        self.environment_calls.load(Ordering::SeqCst)
    }

    /// Fetches of either kind
    pub fn calls(&self) -> usize {
        self.resource_calls() + self.environment_calls()
    }
}

#[async_trait]
impl StatusSource for MockStatusSource {
    async fn fetch_resource_status(
        &self,
        resource: &ResourceRef,
    ) -> Result<ResourceStatus, SourceError> {
        self.resource_calls.fetch_add(1, Ordering::SeqCst);
        self.resources
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Transport(format!("no response scripted for {resource}"))))
    }

    async fn fetch_environment_statuses(
        &self,
        environment_id: &EnvironmentId,
    ) -> Result<EnvironmentStatusSet, SourceError> {
        self.environment_calls.fetch_add(1, Ordering::SeqCst);
        self.environments.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(SourceError::Transport(format!(
                "no snapshot scripted for environment {environment_id}"
            )))
        })
    }
}

/// What a [`RecordingReporter`] saw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reported {
    Progress(StatusCode),
    Succeeded(StatusCode),
    Failed(String),
}

/// Reporter that keeps every call for later assertions.
#[derive(Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Reported>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Reported> {
        self.events.lock().unwrap().clone()
    }
}

impl WatchReporter for RecordingReporter {
    fn progress(&self, _session: &WatchSession, status: &ResourceStatus) {
        self.events
            .lock()
            .unwrap()
            .push(Reported::Progress(status.state.clone()));
    }

    fn succeeded(&self, _session: &WatchSession, status: &ResourceStatus) {
        self.events
            .lock()
            .unwrap()
            .push(Reported::Succeeded(status.state.clone()));
    }

    fn failed(&self, _session: &WatchSession, error: &WatchError) {
        self.events
            .lock()
            .unwrap()
            .push(Reported::Failed(error.to_string()));
    }
}

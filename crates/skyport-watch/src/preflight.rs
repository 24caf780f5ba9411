//! Terminal-state gate run before every mutation.

use crate::classifier::classify;
use crate::error::WatchError;
use crate::source::{SourceError, StatusSource};
use skyport_types::EnvironmentId;
use tracing::debug;

/// Refuses mutations while the owning environment has an operation in flight.
pub struct PreflightGate<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: StatusSource + ?Sized> PreflightGate<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// True iff the environment's own status is terminal, failed included.
    ///
    /// A fetch failure is an error, never an implicit "terminal".
    pub async fn is_environment_terminal(
        &self,
        environment_id: &EnvironmentId,
    ) -> Result<bool, SourceError> {
        let snapshot = self.source.fetch_environment_statuses(environment_id).await?;
        let classification = classify(&snapshot.environment.state);
        debug!(
            environment = %environment_id,
            state = %snapshot.environment.state,
            ?classification,
            "preflight status"
        );
        Ok(classification.is_terminal())
    }

    /// Like [`is_environment_terminal`](Self::is_environment_terminal), with a
    /// non-terminal environment turned into [`WatchError::Precondition`].
    pub async fn ensure_environment_terminal(
        &self,
        environment_id: &EnvironmentId,
    ) -> Result<(), WatchError> {
        if self.is_environment_terminal(environment_id).await? {
            Ok(())
        } else {
            Err(WatchError::Precondition {
                environment_id: environment_id.clone(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockStatusSource;
    use skyport_types::{EnvironmentStatusSet, ResourceStatus, StatusCode};

    fn env_in(state: StatusCode) -> EnvironmentStatusSet {
        EnvironmentStatusSet::new(ResourceStatus::new("env-1", state))
    }

    #[tokio::test]
    async fn test_running_environment_is_not_terminal() {
        let source = MockStatusSource::new().then_environment(env_in(StatusCode::Deploying));
        let gate = PreflightGate::new(&source);

        assert!(!gate
            .is_environment_terminal(&EnvironmentId::new("env-1"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_failed_environment_is_terminal() {
        let source = MockStatusSource::new().then_environment(env_in(StatusCode::DeploymentError));
        let gate = PreflightGate::new(&source);

        assert!(gate
            .is_environment_terminal(&EnvironmentId::new("env-1"))
            .await
            .unwrap());
        assert_eq!(source.environment_calls(), 1);
        assert_eq!(source.resource_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_environment_state_blocks() {
        let source = MockStatusSource::new()
            .then_environment(env_in(StatusCode::Unknown("WAITING_RUNNING".into())));
        let gate = PreflightGate::new(&source);

        let err = gate
            .ensure_environment_terminal(&EnvironmentId::new("env-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, WatchError::Precondition { .. }));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_surfaced() {
        let source = MockStatusSource::new()
            .then_environment_error(SourceError::Transport("connection reset".into()));
        let gate = PreflightGate::new(&source);

        let err = gate
            .ensure_environment_terminal(&EnvironmentId::new("env-1"))
            .await
            .unwrap_err();
        assert!(matches!(err, WatchError::Transport(SourceError::Transport(_))));
    }
}

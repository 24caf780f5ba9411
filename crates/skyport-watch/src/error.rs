//! Watch error types

use crate::source::SourceError;
use crate::watcher::WatchState;
use skyport_types::{EnvironmentId, ResourceRef, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Every way a preflight check or a watch can end without success
#[derive(Debug, Error)]
pub enum WatchError {
    #[error(
        "environment id '{environment_id}' is not in a terminal state. The request is not queued \
         and you must wait for the end of the current operation to run your command. \
         Try again in a few moments"
    )]
    Precondition { environment_id: EnvironmentId },

    #[error("Cannot fetch status: {0}")]
    Transport(#[from] SourceError),

    #[error("{resource} ended in {status}{}", display_message(.message))]
    RemoteFailure {
        resource: ResourceRef,
        status: StatusCode,
        /// Remote text, verbatim; `None` when the control plane sent none
        message: Option<String>,
    },

    #[error("{resource} no longer exists on the control plane")]
    NotFoundDuringWatch { resource: ResourceRef },

    #[error("Stopped watching {resource} after {}s without reaching a terminal state", .elapsed.as_secs())]
    TimedOut {
        resource: ResourceRef,
        elapsed: Duration,
    },
}

fn display_message(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl WatchError {
    /// Watch state this error leaves the session in; `None` for preflight
    /// rejections, which happen before any session exists.
    pub fn state(&self) -> Option<WatchState> {
        match self {
            WatchError::Precondition { .. } => None,
            WatchError::RemoteFailure { .. } | WatchError::NotFoundDuringWatch { .. } => {
                Some(WatchState::Failed)
            }
            WatchError::Transport(_) | WatchError::TimedOut { .. } => Some(WatchState::Errored),
        }
    }

    /// Whether the remote operation itself failed, as opposed to the watch
    pub fn is_remote_failure(&self) -> bool {
        matches!(self.state(), Some(WatchState::Failed))
    }
}

//! Terminal-state classification.

use skyport_types::{Action, StatusCode};

/// Where a status code sits in a resource lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The last operation finished and the resource is settled.
    Success,
    /// The last operation finished with an error.
    Failure,
    /// Anything else, including codes this client does not recognise.
    Running,
}

impl Classification {
    /// Success and failure are both terminal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Classification::Running)
    }
}

/// Classify a status code.
///
/// Unknown codes are `Running`: a code added server-side must never end a
/// watch early or unblock the preflight gate.
pub fn classify(code: &StatusCode) -> Classification {
    match code {
        StatusCode::Deployed
        | StatusCode::Stopped
        | StatusCode::Deleted
        | StatusCode::Restarted
        | StatusCode::Canceled
        | StatusCode::Ready => Classification::Success,

        StatusCode::BuildError
        | StatusCode::DeploymentError
        | StatusCode::StopError
        | StatusCode::DeleteError
        | StatusCode::RestartError => Classification::Failure,

        StatusCode::Queued
        | StatusCode::DeploymentQueued
        | StatusCode::StopQueued
        | StatusCode::DeleteQueued
        | StatusCode::RestartQueued
        | StatusCode::Building
        | StatusCode::Deploying
        | StatusCode::Stopping
        | StatusCode::Deleting
        | StatusCode::Restarting
        | StatusCode::Canceling
        | StatusCode::Executing
        | StatusCode::Unknown(_) => Classification::Running,
    }
}

/// Classify a status observed while watching `action`.
///
/// A success code only settles the watch when it is one `action` produces;
/// any other success code is the state left over from before the submission
/// and keeps the watch `Running`. `CANCELED` means the operation will never
/// settle, so it ends every watch as a failure. Failure codes are terminal
/// whatever the action.
pub fn classify_for(action: Action, code: &StatusCode) -> Classification {
    match classify(code) {
        Classification::Success if settles(action, code) => Classification::Success,
        Classification::Success if *code == StatusCode::Canceled => Classification::Failure,
        Classification::Success => Classification::Running,
        other => other,
    }
}

fn settles(action: Action, code: &StatusCode) -> bool {
    match action {
        Action::Deploy | Action::Redeploy => matches!(
            code,
            StatusCode::Deployed | StatusCode::Ready | StatusCode::Restarted
        ),
        Action::Stop => matches!(code, StatusCode::Stopped),
        Action::Delete => matches!(code, StatusCode::Deleted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS: [&str; 6] = [
        "DEPLOYED",
        "STOPPED",
        "DELETED",
        "RESTARTED",
        "CANCELED",
        "READY",
    ];
    const FAILURE: [&str; 5] = [
        "BUILD_ERROR",
        "DEPLOYMENT_ERROR",
        "STOP_ERROR",
        "DELETE_ERROR",
        "RESTART_ERROR",
    ];

    #[test]
    fn test_success_codes() {
        for code in SUCCESS {
            assert_eq!(
                classify(&StatusCode::parse(code)),
                Classification::Success,
                "{code}"
            );
        }
    }

    #[test]
    fn test_failure_codes() {
        for code in FAILURE {
            assert_eq!(
                classify(&StatusCode::parse(code)),
                Classification::Failure,
                "{code}"
            );
        }
    }

    #[test]
    fn test_every_other_known_code_is_running() {
        for code in StatusCode::KNOWN.iter() {
            let name = code.as_str();
            if SUCCESS.contains(&name) || FAILURE.contains(&name) {
                continue;
            }
            assert_eq!(classify(code), Classification::Running, "{name}");
        }
    }

    #[test]
    fn test_unrecognised_codes_are_running() {
        for code in ["", "   ", "WAITING_RUNNING", "deployed_maybe", "ERROR"] {
            let parsed = StatusCode::parse(code);
            assert_eq!(classify(&parsed), Classification::Running, "{code:?}");
            assert!(!classify(&parsed).is_terminal());
        }
    }

    #[test]
    fn test_terminal_includes_failure() {
        assert!(Classification::Success.is_terminal());
        assert!(Classification::Failure.is_terminal());
        assert!(!Classification::Running.is_terminal());
    }

    #[test]
    fn test_stop_ignores_stale_deploy_success() {
        assert_eq!(
            classify_for(Action::Stop, &StatusCode::Deployed),
            Classification::Running
        );
        assert_eq!(
            classify_for(Action::Stop, &StatusCode::Stopped),
            Classification::Success
        );
    }

    #[test]
    fn test_expected_success_per_action() {
        for code in [StatusCode::Deployed, StatusCode::Ready, StatusCode::Restarted] {
            assert_eq!(classify_for(Action::Deploy, &code), Classification::Success);
            assert_eq!(classify_for(Action::Redeploy, &code), Classification::Success);
            assert_eq!(classify_for(Action::Delete, &code), Classification::Running);
        }
        assert_eq!(
            classify_for(Action::Delete, &StatusCode::Deleted),
            Classification::Success
        );
        assert_eq!(
            classify_for(Action::Deploy, &StatusCode::Stopped),
            Classification::Running
        );
    }

    #[test]
    fn test_failures_end_every_action() {
        for action in [Action::Deploy, Action::Stop, Action::Redeploy, Action::Delete] {
            assert_eq!(
                classify_for(action, &StatusCode::StopError),
                Classification::Failure
            );
            assert_eq!(
                classify_for(action, &StatusCode::Canceled),
                Classification::Failure
            );
            assert_eq!(
                classify_for(action, &StatusCode::Unknown("WAITING_RUNNING".into())),
                Classification::Running
            );
        }
    }
}

//! Lifecycle status vocabulary
//!
//! The control plane reports state as a free-form string. This client maps the
//! codes it knows onto variants and keeps anything else as [`StatusCode::Unknown`]
//! so that a newer server never breaks deserialization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a deployable resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusCode {
    Queued,
    DeploymentQueued,
    StopQueued,
    DeleteQueued,
    RestartQueued,

    Building,
    Deploying,
    Stopping,
    Deleting,
    Restarting,
    Canceling,
    Executing,

    Deployed,
    Stopped,
    Deleted,
    Restarted,
    Canceled,
    Ready,

    BuildError,
    DeploymentError,
    StopError,
    DeleteError,
    RestartError,

    /// A code this client does not recognise, kept verbatim
    Unknown(String),
}

impl StatusCode {
    /// Every code with a dedicated variant, in wire order
    pub const KNOWN: [StatusCode; 23] = [
        StatusCode::Queued,
        StatusCode::DeploymentQueued,
        StatusCode::StopQueued,
        StatusCode::DeleteQueued,
        StatusCode::RestartQueued,
        StatusCode::Building,
        StatusCode::Deploying,
        StatusCode::Stopping,
        StatusCode::Deleting,
        StatusCode::Restarting,
        StatusCode::Canceling,
        StatusCode::Executing,
        StatusCode::Deployed,
        StatusCode::Stopped,
        StatusCode::Deleted,
        StatusCode::Restarted,
        StatusCode::Canceled,
        StatusCode::Ready,
        StatusCode::BuildError,
        StatusCode::DeploymentError,
        StatusCode::StopError,
        StatusCode::DeleteError,
        StatusCode::RestartError,
    ];

    /// Parse a wire code. Matching is case-insensitive; anything unrecognised
    /// becomes `Unknown`.
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_uppercase().as_str() {
            "QUEUED" => Self::Queued,
            "DEPLOYMENT_QUEUED" => Self::DeploymentQueued,
            "STOP_QUEUED" => Self::StopQueued,
            "DELETE_QUEUED" => Self::DeleteQueued,
            "RESTART_QUEUED" => Self::RestartQueued,
            "BUILDING" => Self::Building,
            "DEPLOYING" => Self::Deploying,
            "STOPPING" => Self::Stopping,
            "DELETING" => Self::Deleting,
            "RESTARTING" => Self::Restarting,
            "CANCELING" => Self::Canceling,
            "EXECUTING" => Self::Executing,
            "DEPLOYED" => Self::Deployed,
            "STOPPED" => Self::Stopped,
            "DELETED" => Self::Deleted,
            "RESTARTED" => Self::Restarted,
            "CANCELED" => Self::Canceled,
            "READY" => Self::Ready,
            "BUILD_ERROR" => Self::BuildError,
            "DEPLOYMENT_ERROR" => Self::DeploymentError,
            "STOP_ERROR" => Self::StopError,
            "DELETE_ERROR" => Self::DeleteError,
            "RESTART_ERROR" => Self::RestartError,
            _ => Self::Unknown(code.to_string()),
        }
    }

    /// Wire form of the code
    pub fn as_str(&self) -> &str {
        match self {
            Self::Queued => "QUEUED",
            Self::DeploymentQueued => "DEPLOYMENT_QUEUED",
            Self::StopQueued => "STOP_QUEUED",
            Self::DeleteQueued => "DELETE_QUEUED",
            Self::RestartQueued => "RESTART_QUEUED",
            Self::Building => "BUILDING",
            Self::Deploying => "DEPLOYING",
            Self::Stopping => "STOPPING",
            Self::Deleting => "DELETING",
            Self::Restarting => "RESTARTING",
            Self::Canceling => "CANCELING",
            Self::Executing => "EXECUTING",
            Self::Deployed => "DEPLOYED",
            Self::Stopped => "STOPPED",
            Self::Deleted => "DELETED",
            Self::Restarted => "RESTARTED",
            Self::Canceled => "CANCELED",
            Self::Ready => "READY",
            Self::BuildError => "BUILD_ERROR",
            Self::DeploymentError => "DEPLOYMENT_ERROR",
            Self::StopError => "STOP_ERROR",
            Self::DeleteError => "DELETE_ERROR",
            Self::RestartError => "RESTART_ERROR",
            Self::Unknown(code) => code,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl From<String> for StatusCode {
    fn from(code: String) -> Self {
        Self::parse(&code)
    }
}

impl From<&str> for StatusCode {
    fn from(code: &str) -> Self {
        Self::parse(code)
    }
}

impl From<StatusCode> for String {
    fn from(code: StatusCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single resource as reported by the control plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceStatus {
    /// Resource (or environment) the status belongs to
    pub id: String,

    /// Lifecycle code
    pub state: StatusCode,

    /// Human-readable detail, usually only present on errors
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ResourceStatus {
    pub fn new(id: impl Into<String>, state: StatusCode) -> Self {
        Self {
            id: id.into(),
            state,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

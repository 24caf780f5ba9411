//! Read-only access to remote lifecycle status.

use async_trait::async_trait;
use skyport_types::{EnvironmentId, EnvironmentStatusSet, ResourceRef, ResourceStatus};
use thiserror::Error;

/// Failure to read a status from the control plane.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    /// The resource does not exist (any more).
    #[error("Not found: {0}")]
    NotFound(String),

    /// The credential was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Network failure, unexpected response, or undecodable body.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Where statuses come from. Implemented by the REST client.
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Current status of a single resource.
    async fn fetch_resource_status(
        &self,
        resource: &ResourceRef,
    ) -> Result<ResourceStatus, SourceError>;

    /// Snapshot of every status in an environment, including its own.
    async fn fetch_environment_statuses(
        &self,
        environment_id: &EnvironmentId,
    ) -> Result<EnvironmentStatusSet, SourceError>;
}

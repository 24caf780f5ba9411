//! Environment-wide status snapshot

use crate::{ResourceKind, ResourceStatus};
use serde::{Deserialize, Serialize};

/// Every status in one environment, fetched in a single request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentStatusSet {
    /// The environment's own aggregate status
    pub environment: ResourceStatus,

    #[serde(default)]
    pub applications: Vec<ResourceStatus>,

    #[serde(default)]
    pub containers: Vec<ResourceStatus>,

    #[serde(default)]
    pub databases: Vec<ResourceStatus>,

    #[serde(default)]
    pub jobs: Vec<ResourceStatus>,
}

impl EnvironmentStatusSet {
    pub fn new(environment: ResourceStatus) -> Self {
        Self {
            environment,
            applications: Vec::new(),
            containers: Vec::new(),
            databases: Vec::new(),
            jobs: Vec::new(),
        }
    }

    /// Statuses recorded for one kind of resource
    pub fn statuses(&self, kind: ResourceKind) -> &[ResourceStatus] {
        match kind {
            ResourceKind::Application => &self.applications,
            ResourceKind::Container => &self.containers,
            ResourceKind::Database => &self.databases,
            ResourceKind::Job => &self.jobs,
            ResourceKind::Environment => std::slice::from_ref(&self.environment),
        }
    }

    /// Status of a resource in this snapshot, `None` when it is absent
    pub fn find(&self, kind: ResourceKind, id: &str) -> Option<&ResourceStatus> {
        self.statuses(kind).iter().find(|status| status.id == id)
    }

    pub fn with(mut self, kind: ResourceKind, status: ResourceStatus) -> Self {
        match kind {
            ResourceKind::Application => self.applications.push(status),
            ResourceKind::Container => self.containers.push(status),
            ResourceKind::Database => self.databases.push(status),
            ResourceKind::Job => self.jobs.push(status),
            ResourceKind::Environment => self.environment = status,
        }
        self
    }
}

//! Deployable resources and the actions that can be submitted against them

use crate::{EnvironmentId, ResourceId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of resource a mutation or a watch targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Application,
    Container,
    Database,
    Job,
    Environment,
}

impl ResourceKind {
    /// Path segment used by the REST API
    pub fn api_segment(&self) -> &'static str {
        match self {
            ResourceKind::Application => "application",
            ResourceKind::Container => "container",
            ResourceKind::Database => "database",
            ResourceKind::Job => "job",
            ResourceKind::Environment => "environment",
        }
    }

    /// Name shown to users; jobs are surfaced as lifecycles
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Job => "lifecycle",
            other => other.api_segment(),
        }
    }

    /// Whether a status for this kind is only available through the
    /// environment-wide snapshot
    pub fn uses_environment_snapshot(&self) -> bool {
        matches!(
            self,
            ResourceKind::Container | ResourceKind::Database | ResourceKind::Job
        )
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A concrete resource: kind, id and the name the user typed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    pub kind: ResourceKind,
    pub id: ResourceId,
    pub name: String,
}

impl ResourceRef {
    pub fn new(kind: ResourceKind, id: impl Into<ResourceId>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
        }
    }

    /// Reference to an environment as a watchable resource
    pub fn environment(id: &EnvironmentId, name: impl Into<String>) -> Self {
        Self::new(ResourceKind::Environment, id.as_str(), name)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.name)
    }
}

/// State-changing operation submitted to the control plane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Deploy,
    Stop,
    Redeploy,
    Delete,
}

impl Action {
    /// Present participle used in progress messages
    pub fn progressive(&self) -> &'static str {
        match self {
            Action::Deploy => "Deploying",
            Action::Stop => "Stopping",
            Action::Redeploy => "Redeploying",
            Action::Delete => "Deleting",
        }
    }

    /// Whether the control plane exposes this action for a resource kind
    pub fn supported_by(&self, kind: ResourceKind) -> bool {
        !matches!((self, kind), (Action::Redeploy, ResourceKind::Database))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Action::Deploy => "deploy",
            Action::Stop => "stop",
            Action::Redeploy => "redeploy",
            Action::Delete => "delete",
        };
        f.write_str(verb)
    }
}

/// Paginated list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
        }
    }
}

/// Anything that can be looked up by its display name
pub trait Named {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    /// Find the first item whose name matches exactly
    fn find_by_name<'a>(items: &'a [Self], name: &str) -> Option<&'a Self>
    where
        Self: Sized,
    {
        items.iter().find(|item| item.name() == name)
    }
}

macro_rules! named {
    ($($ty:ty),* $(,)?) => {
        $(impl Named for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn name(&self) -> &str {
                &self.name
            }
        })*
    };
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    pub id: String,
    pub name: String,
    /// Environment mode (DEVELOPMENT, STAGING, PRODUCTION, ...)
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    /// Commit currently running, when the application is built from git
    #[serde(default)]
    pub deployed_commit_id: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub id: String,
    pub name: String,
    /// Engine (POSTGRESQL, MYSQL, REDIS, MONGODB)
    #[serde(default, rename = "type")]
    pub engine: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A lifecycle job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Message broker attached to an environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broker {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<BrokerStatus>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub fqdn: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub applications: Option<Vec<BrokerApplication>>,
}

impl Broker {
    /// Names of the applications using this broker
    pub fn application_names(&self) -> Vec<&str> {
        self.applications
            .iter()
            .flatten()
            .map(|app| app.name.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerStatus {
    #[serde(default)]
    pub code_message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerApplication {
    pub name: String,
}

named!(Organization, Project, Environment, Application, Container, Database, Job, Broker);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_by_name() {
        let apps = vec![
            Application {
                id: "a1".into(),
                name: "api".into(),
                deployed_commit_id: None,
                updated_at: None,
            },
            Application {
                id: "a2".into(),
                name: "web".into(),
                deployed_commit_id: Some("4f2a9c1".into()),
                updated_at: None,
            },
        ];

        assert_eq!(Application::find_by_name(&apps, "web").unwrap().id, "a2");
        assert!(Application::find_by_name(&apps, "Web").is_none());
    }

    #[test]
    fn test_redeploy_not_offered_for_databases() {
        assert!(!Action::Redeploy.supported_by(ResourceKind::Database));
        assert!(Action::Redeploy.supported_by(ResourceKind::Job));
        assert!(Action::Delete.supported_by(ResourceKind::Database));
    }

    #[test]
    fn test_jobs_are_labelled_lifecycle() {
        let job = ResourceRef::new(ResourceKind::Job, "j1", "migrate");
        assert_eq!(job.to_string(), "lifecycle migrate");
        assert_eq!(ResourceKind::Job.api_segment(), "job");
    }

    #[test]
    fn test_broker_application_names() {
        let broker: Broker = serde_json::from_str(
            r#"{"id":"b1","name":"queue","applications":[{"name":"api"},{"name":"worker"}]}"#,
        )
        .unwrap();
        assert_eq!(broker.application_names(), vec!["api", "worker"]);

        let bare: Broker = serde_json::from_str(r#"{"id":"b2","name":"events"}"#).unwrap();
        assert!(bare.application_names().is_empty());
    }
}

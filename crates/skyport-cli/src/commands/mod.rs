//! CLI command implementations

pub mod action;
pub mod application;
pub mod broker;
pub mod container;
pub mod database;
pub mod deploy;
pub mod environment;
pub mod lifecycle;
pub mod logs;
pub mod resource;
pub mod variable;

use crate::client::ApiClient;
use crate::config::Settings;
use crate::context::{self, ResolvedContext};
use crate::error::{CliError, CliResult};
use crate::output::OutputFormat;
use skyport_types::{Application, Container, Database, Job, Named, ResourceKind, ResourceRef};

/// Everything a command needs: the API, the merged settings and how to print
pub struct CommandContext {
    pub client: ApiClient,
    pub settings: Settings,
    pub format: OutputFormat,
    /// Whether stdout is a terminal; drives spinners and confirmations
    pub interactive: bool,
}

impl CommandContext {
    pub fn new(client: ApiClient, settings: Settings, format: OutputFormat, interactive: bool) -> Self {
        Self {
            client,
            settings,
            format,
            interactive,
        }
    }

    /// Resolve organization, project and environment ids
    pub async fn resolve(&self) -> CliResult<ResolvedContext> {
        context::resolve(&self.client, &self.settings).await
    }

    /// Look up a resource of `kind` by name inside the resolved environment
    pub async fn find_resource(
        &self,
        ctx: &ResolvedContext,
        kind: ResourceKind,
        name: &str,
    ) -> CliResult<ResourceRef> {
        let env = &ctx.environment_id;
        let id = match kind {
            ResourceKind::Application => {
                let items = self.client.list_applications(env).await?;
                Application::find_by_name(&items, name).map(|item| item.id.clone())
            }
            ResourceKind::Container => {
                let items = self.client.list_containers(env).await?;
                Container::find_by_name(&items, name).map(|item| item.id.clone())
            }
            ResourceKind::Database => {
                let items = self.client.list_databases(env).await?;
                Database::find_by_name(&items, name).map(|item| item.id.clone())
            }
            ResourceKind::Job => {
                let items = self.client.list_jobs(env).await?;
                Job::find_by_name(&items, name).map(|item| item.id.clone())
            }
            ResourceKind::Environment => {
                return Ok(ResourceRef::environment(env, ctx.environment_name.clone()));
            }
        };

        id.map(|id| ResourceRef::new(kind, id, name))
            .ok_or_else(|| CliError::ResourceNotFound {
                kind,
                name: name.to_string(),
            })
    }
}

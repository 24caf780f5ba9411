//! Organization / project / environment resolution

use crate::client::ApiClient;
use crate::config::Settings;
use crate::error::{CliError, CliResult};
use skyport_types::{EnvironmentId, Named, OrganizationId, ProjectId};
use tracing::debug;

/// Ids every environment-scoped command works against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    pub organization_id: OrganizationId,
    pub project_id: ProjectId,
    pub environment_id: EnvironmentId,
    pub environment_name: String,
}

/// Resolve the configured names to ids, walking organization -> project -> environment
pub async fn resolve(client: &ApiClient, settings: &Settings) -> CliResult<ResolvedContext> {
    let organizations = client.list_organizations().await?;
    let organization = pick(&organizations, settings.organization.as_deref(), "organization")?;

    let organization_id = OrganizationId::new(organization.id());
    let projects = client.list_projects(&organization_id).await?;
    let project = pick(&projects, settings.project.as_deref(), "project")?;

    let project_id = ProjectId::new(project.id());
    let environments = client.list_environments(&project_id).await?;
    let environment = pick(&environments, settings.environment.as_deref(), "environment")?;

    let context = ResolvedContext {
        organization_id,
        project_id,
        environment_id: EnvironmentId::new(environment.id()),
        environment_name: environment.name().to_string(),
    };
    debug!(?context, "resolved context");
    Ok(context)
}

/// Match by name, or take the only candidate when no name was given
fn pick<'a, T: Named>(items: &'a [T], name: Option<&str>, what: &str) -> CliResult<&'a T> {
    match name {
        Some(name) => T::find_by_name(items, name)
            .ok_or_else(|| CliError::NotFound(format!("{} {} not found", what, name))),
        None => match items {
            [only] => Ok(only),
            [] => Err(CliError::NotFound(format!("no {} available", what))),
            _ => Err(CliError::InvalidInput(format!(
                "several {}s available ({}); pass --{} or set `{}` in the config file",
                what,
                items
                    .iter()
                    .map(|item| item.name())
                    .collect::<Vec<_>>()
                    .join(", "),
                what,
                what
            ))),
        },
    }
}

//! Environment variables, secrets and aliases on a resource

use super::CommandContext;
use crate::client::VariableOwner;
use crate::context::ResolvedContext;
use crate::error::{CliError, CliResult};
use crate::output::print_success;
use clap::Subcommand;
use colored::*;
use skyport_types::{ResourceKind, ResourceRef, VariableRequest, VariableScope};
use tracing::debug;

/// `<kind> env` subcommands
#[derive(Subcommand)]
pub enum EnvCommands {
    /// Create an environment variable or secret
    Create {
        /// Resource name
        #[arg(short = 'n', long, aliases = ["application", "container", "lifecycle"])]
        name: String,

        /// Environment variable or secret key
        #[arg(short, long)]
        key: String,

        /// Environment variable or secret value
        #[arg(long)]
        value: String,

        /// Scope of this variable (PROJECT, ENVIRONMENT, or the resource's own scope)
        #[arg(long)]
        scope: Option<VariableScope>,

        /// This environment variable is a secret
        #[arg(long)]
        secret: bool,
    },

    /// Manage environment variable and secret aliases
    Alias {
        #[command(subcommand)]
        command: AliasCommands,
    },
}

/// `<kind> env alias` subcommands
#[derive(Subcommand)]
pub enum AliasCommands {
    /// Create an alias of an existing environment variable or secret
    Create {
        /// Resource name
        #[arg(short = 'n', long, aliases = ["application", "container", "lifecycle"])]
        name: String,

        /// Key of the environment variable or secret to alias
        #[arg(short, long)]
        key: String,

        /// Alias name
        #[arg(long)]
        alias: String,

        /// Scope of this alias (PROJECT, ENVIRONMENT, or the resource's own scope)
        #[arg(long)]
        scope: Option<VariableScope>,
    },
}

/// Execute an env command against a resource of `kind`
pub async fn execute(command: EnvCommands, kind: ResourceKind, cmd: &CommandContext) -> CliResult<()> {
    match command {
        EnvCommands::Create {
            name,
            key,
            value,
            scope,
            secret,
        } => {
            let ctx = cmd.resolve().await?;
            let target = cmd.find_resource(&ctx, kind, &name).await?;
            let owner = owner_for_scope(&ctx, &target, scope)?;

            let request = VariableRequest {
                key: key.clone(),
                value,
            };
            cmd.client.create_variable(&owner, &request, secret).await?;

            let what = if secret { "Secret" } else { "Environment variable" };
            print_success(&format!("{} {} has been created", what, key.blue()));
            Ok(())
        }

        EnvCommands::Alias {
            command:
                AliasCommands::Create {
                    name,
                    key,
                    alias,
                    scope,
                },
        } => {
            let ctx = cmd.resolve().await?;
            let target = cmd.find_resource(&ctx, kind, &name).await?;
            let owner = owner_for_scope(&ctx, &target, scope)?;

            let (variable_id, secret) = find_variable(cmd, &target, &key).await?;
            debug!(%key, %variable_id, secret, "aliasing");
            cmd.client
                .create_alias(&owner, &variable_id, &alias, secret)
                .await?;

            print_success(&format!("Alias {} has been created", alias.blue()));
            Ok(())
        }
    }
}

/// Scope a resource's variables default to
pub fn default_scope(kind: ResourceKind) -> Option<VariableScope> {
    match kind {
        ResourceKind::Application => Some(VariableScope::Application),
        ResourceKind::Container => Some(VariableScope::Container),
        ResourceKind::Job => Some(VariableScope::Job),
        ResourceKind::Environment => Some(VariableScope::Environment),
        ResourceKind::Database => None,
    }
}

/// Where a variable at `scope` is created when working from `target`
fn owner_for_scope(
    ctx: &ResolvedContext,
    target: &ResourceRef,
    scope: Option<VariableScope>,
) -> CliResult<VariableOwner> {
    let own = default_scope(target.kind);
    let scope = scope.or(own).ok_or_else(|| {
        CliError::InvalidInput(format!("a {} has no variables", target.kind.label()))
    })?;

    match scope {
        VariableScope::Project => Ok(VariableOwner::project(&ctx.project_id)),
        VariableScope::Environment => Ok(VariableOwner::environment(&ctx.environment_id)),
        other if Some(other) == own => Ok(VariableOwner::resource(target)),
        other => Err(CliError::InvalidInput(format!(
            "scope {} is not valid for a {}; use PROJECT, ENVIRONMENT or {}",
            other,
            target.kind.label(),
            own.map(|s| s.as_str()).unwrap_or("-")
        ))),
    }
}

/// Id of the variable or secret named `key` visible on `target`
async fn find_variable(
    cmd: &CommandContext,
    target: &ResourceRef,
    key: &str,
) -> CliResult<(String, bool)> {
    let owner = VariableOwner::resource(target);
    for secret in [false, true] {
        let variables = cmd.client.list_variables(&owner, secret).await?;
        if let Some(variable) = variables.into_iter().find(|v| v.key == key) {
            return Ok((variable.id, secret));
        }
    }
    Err(CliError::NotFound(format!(
        "environment variable or secret {} not found on {}",
        key, target
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyport_types::{EnvironmentId, OrganizationId, ProjectId};

    fn ctx() -> ResolvedContext {
        ResolvedContext {
            organization_id: OrganizationId::new("org-1"),
            project_id: ProjectId::new("proj-1"),
            environment_id: EnvironmentId::new("env-1"),
            environment_name: "staging".into(),
        }
    }

    #[test]
    fn test_default_scope_is_the_resource() {
        let target = ResourceRef::new(ResourceKind::Job, "job-1", "migrate");
        let owner = owner_for_scope(&ctx(), &target, None).unwrap();
        assert_eq!(owner, VariableOwner::resource(&target));
    }

    #[test]
    fn test_project_and_environment_scopes() {
        let target = ResourceRef::new(ResourceKind::Application, "app-1", "api");
        assert_eq!(
            owner_for_scope(&ctx(), &target, Some(VariableScope::Project)).unwrap(),
            VariableOwner::project(&ProjectId::new("proj-1"))
        );
        assert_eq!(
            owner_for_scope(&ctx(), &target, Some(VariableScope::Environment)).unwrap(),
            VariableOwner::environment(&EnvironmentId::new("env-1"))
        );
    }

    #[test]
    fn test_foreign_resource_scope_rejected() {
        let target = ResourceRef::new(ResourceKind::Container, "c-1", "worker");
        let err = owner_for_scope(&ctx(), &target, Some(VariableScope::Application)).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(ref m) if m.contains("CONTAINER")));
    }
}

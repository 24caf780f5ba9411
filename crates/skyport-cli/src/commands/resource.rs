//! Listing shared by applications, containers, databases and lifecycle jobs

use super::CommandContext;
use crate::context::ResolvedContext;
use crate::error::CliResult;
use crate::output::{self, format_timestamp};
use chrono::{DateTime, Utc};
use serde::Serialize;
use skyport_types::{EnvironmentStatusSet, ResourceKind};
use tabled::Tabled;

/// Table row for a deployable resource
#[derive(Debug, Serialize, Tabled)]
pub struct ResourceRow {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    pub kind: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "Last Update")]
    pub last_update: String,
}

impl ResourceRow {
    fn new(
        snapshot: &EnvironmentStatusSet,
        kind: ResourceKind,
        id: &str,
        name: &str,
        type_label: Option<&str>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        let status = snapshot
            .find(kind, id)
            .map(|status| status.state.to_string())
            .unwrap_or_else(|| "-".to_string());
        Self {
            name: name.to_string(),
            kind: type_label.unwrap_or(kind.label()).to_string(),
            status,
            last_update: format_timestamp(updated_at),
        }
    }
}

/// Rows for every resource of `kind` in the environment, statuses taken from
/// one snapshot
pub async fn rows(
    cmd: &CommandContext,
    ctx: &ResolvedContext,
    kind: ResourceKind,
) -> CliResult<Vec<ResourceRow>> {
    let env = &ctx.environment_id;
    let snapshot = cmd.client.environment_statuses(env).await?;

    let rows = match kind {
        ResourceKind::Application => cmd
            .client
            .list_applications(env)
            .await?
            .iter()
            .map(|a| ResourceRow::new(&snapshot, kind, &a.id, &a.name, None, a.updated_at))
            .collect(),
        ResourceKind::Container => cmd
            .client
            .list_containers(env)
            .await?
            .iter()
            .map(|c| ResourceRow::new(&snapshot, kind, &c.id, &c.name, None, c.updated_at))
            .collect(),
        ResourceKind::Database => cmd
            .client
            .list_databases(env)
            .await?
            .iter()
            .map(|d| {
                ResourceRow::new(
                    &snapshot,
                    kind,
                    &d.id,
                    &d.name,
                    d.engine.as_deref(),
                    d.updated_at,
                )
            })
            .collect(),
        ResourceKind::Job => cmd
            .client
            .list_jobs(env)
            .await?
            .iter()
            .map(|j| ResourceRow::new(&snapshot, kind, &j.id, &j.name, None, j.updated_at))
            .collect(),
        ResourceKind::Environment => vec![ResourceRow::new(
            &snapshot,
            kind,
            env.as_str(),
            &ctx.environment_name,
            None,
            None,
        )],
    };
    Ok(rows)
}

/// Print the list of resources of `kind`
pub async fn list(cmd: &CommandContext, kind: ResourceKind) -> CliResult<()> {
    let ctx = cmd.resolve().await?;
    let rows = rows(cmd, &ctx, kind).await?;
    output::print_output(rows, cmd.format)
}

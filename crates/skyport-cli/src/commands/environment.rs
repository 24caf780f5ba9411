//! Environment commands

use super::action::{self, ActionFlags};
use super::CommandContext;
use crate::error::CliResult;
use crate::output::{colorize_state, format_timestamp, print_output, OutputFormat};
use clap::Subcommand;
use colored::*;
use serde::Serialize;
use skyport_types::{Action, EnvironmentId, EnvironmentStatusSet, ResourceKind, ResourceRef};
use std::collections::HashMap;
use tabled::Tabled;

/// Environment subcommands
#[derive(Subcommand)]
pub enum EnvironmentCommands {
    /// List the environments of the project
    List,

    /// Show the environment status and the status of everything in it
    Status,

    /// Deploy the environment
    Deploy {
        /// Watch the environment status until it's ready or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Stop the environment
    Stop {
        /// Watch the environment status until it's stopped or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Redeploy the environment
    Redeploy {
        /// Watch the environment status until it's ready or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Delete the environment
    Delete {
        /// Watch the environment status until it's deleted or an error occurs
        #[arg(short, long)]
        watch: bool,

        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Table row for environment display
#[derive(Debug, Serialize, Tabled)]
struct EnvironmentRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Last Update")]
    last_update: String,
}

/// One line of `environment status`
#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Execute an environment command
pub async fn execute(command: EnvironmentCommands, cmd: &CommandContext) -> CliResult<()> {
    let (action, flags) = match command {
        EnvironmentCommands::List => return list(cmd).await,
        EnvironmentCommands::Status => return status(cmd).await,
        EnvironmentCommands::Deploy { watch } => (Action::Deploy, ActionFlags::watch(watch)),
        EnvironmentCommands::Stop { watch } => (Action::Stop, ActionFlags::watch(watch)),
        EnvironmentCommands::Redeploy { watch } => (Action::Redeploy, ActionFlags::watch(watch)),
        EnvironmentCommands::Delete { watch, yes } => (Action::Delete, ActionFlags { watch, yes }),
    };

    let ctx = cmd.resolve().await?;
    let target = ResourceRef::environment(&ctx.environment_id, ctx.environment_name.clone());
    action::run(cmd, &ctx, &target, action, flags).await?;
    Ok(())
}

async fn list(cmd: &CommandContext) -> CliResult<()> {
    let ctx = cmd.resolve().await?;
    let rows: Vec<EnvironmentRow> = cmd
        .client
        .list_environments(&ctx.project_id)
        .await?
        .into_iter()
        .map(|env| EnvironmentRow {
            name: env.name,
            mode: env.mode.unwrap_or_else(|| "-".to_string()),
            last_update: format_timestamp(env.updated_at),
        })
        .collect();
    print_output(rows, cmd.format)
}

async fn status(cmd: &CommandContext) -> CliResult<()> {
    let ctx = cmd.resolve().await?;
    let snapshot = cmd.client.environment_statuses(&ctx.environment_id).await?;

    let mut names = HashMap::new();
    for kind in [
        ResourceKind::Application,
        ResourceKind::Container,
        ResourceKind::Database,
        ResourceKind::Job,
    ] {
        names.extend(resource_names(cmd, &ctx.environment_id, kind).await?);
    }

    if cmd.format == OutputFormat::Table {
        println!(
            "Environment {} is {}",
            ctx.environment_name.blue(),
            colorize_state(&snapshot.environment.state)
        );
    }
    print_output(status_rows(&snapshot, &names), cmd.format)
}

async fn resource_names(
    cmd: &CommandContext,
    env: &EnvironmentId,
    kind: ResourceKind,
) -> CliResult<Vec<(String, String)>> {
    let pairs = match kind {
        ResourceKind::Application => cmd
            .client
            .list_applications(env)
            .await?
            .into_iter()
            .map(|a| (a.id, a.name))
            .collect(),
        ResourceKind::Container => cmd
            .client
            .list_containers(env)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect(),
        ResourceKind::Database => cmd
            .client
            .list_databases(env)
            .await?
            .into_iter()
            .map(|d| (d.id, d.name))
            .collect(),
        ResourceKind::Job => cmd
            .client
            .list_jobs(env)
            .await?
            .into_iter()
            .map(|j| (j.id, j.name))
            .collect(),
        ResourceKind::Environment => Vec::new(),
    };
    Ok(pairs)
}

fn status_rows(snapshot: &EnvironmentStatusSet, names: &HashMap<String, String>) -> Vec<StatusRow> {
    [
        ResourceKind::Application,
        ResourceKind::Container,
        ResourceKind::Database,
        ResourceKind::Job,
    ]
    .into_iter()
    .flat_map(|kind| {
        snapshot.statuses(kind).iter().map(move |status| StatusRow {
            kind: kind.label().to_string(),
            name: names
                .get(&status.id)
                .cloned()
                .unwrap_or_else(|| status.id.clone()),
            status: status.state.to_string(),
            message: status.message.clone().unwrap_or_default(),
        })
    })
    .collect()
}

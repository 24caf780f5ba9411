//! Application commands

use super::action::{self, ActionFlags};
use super::{logs, resource, variable, CommandContext};
use crate::error::CliResult;
use clap::Subcommand;
use skyport_types::{Action, ResourceKind};

const KIND: ResourceKind = ResourceKind::Application;

/// Application subcommands
#[derive(Subcommand)]
pub enum ApplicationCommands {
    /// List applications with their status
    List,

    /// Deploy an application
    Deploy {
        /// Application name
        #[arg(short = 'n', long = "name", visible_alias = "application")]
        name: String,

        /// Watch the application status until it's ready or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Stop an application
    Stop {
        /// Application name
        #[arg(short = 'n', long = "name", visible_alias = "application")]
        name: String,

        /// Watch the application status until it's stopped or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Redeploy an application
    Redeploy {
        /// Application name
        #[arg(short = 'n', long = "name", visible_alias = "application")]
        name: String,

        /// Watch the application status until it's ready or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Delete an application
    Delete {
        /// Application name
        #[arg(short = 'n', long = "name", visible_alias = "application")]
        name: String,

        /// Watch the application status until it's deleted or an error occurs
        #[arg(short, long)]
        watch: bool,

        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Manage application environment variables and secrets
    Env {
        #[command(subcommand)]
        command: variable::EnvCommands,
    },

    /// Show application logs
    Log {
        /// Application name
        #[arg(short = 'n', long = "name", visible_alias = "application")]
        name: String,

        /// Number of lines to fetch
        #[arg(short, long, default_value = "100")]
        lines: u32,

        /// Keep polling for new lines until interrupted
        #[arg(short, long)]
        follow: bool,
    },
}

/// Execute an application command
pub async fn execute(command: ApplicationCommands, cmd: &CommandContext) -> CliResult<()> {
    let (name, action, flags) = match command {
        ApplicationCommands::List => return resource::list(cmd, KIND).await,
        ApplicationCommands::Env { command } => return variable::execute(command, KIND, cmd).await,
        ApplicationCommands::Log {
            name,
            lines,
            follow,
        } => return logs::execute(cmd, &name, lines, follow).await,
        ApplicationCommands::Deploy { name, watch } => (name, Action::Deploy, ActionFlags::watch(watch)),
        ApplicationCommands::Stop { name, watch } => (name, Action::Stop, ActionFlags::watch(watch)),
        ApplicationCommands::Redeploy { name, watch } => {
            (name, Action::Redeploy, ActionFlags::watch(watch))
        }
        ApplicationCommands::Delete { name, watch, yes } => {
            (name, Action::Delete, ActionFlags { watch, yes })
        }
    };

    let ctx = cmd.resolve().await?;
    let target = cmd.find_resource(&ctx, KIND, &name).await?;
    action::run(cmd, &ctx, &target, action, flags).await?;
    Ok(())
}

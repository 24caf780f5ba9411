//! Lifecycle job commands

use super::action::{self, ActionFlags};
use super::{resource, variable, CommandContext};
use crate::error::CliResult;
use clap::Subcommand;
use skyport_types::{Action, ResourceKind};

const KIND: ResourceKind = ResourceKind::Job;

/// Lifecycle subcommands
#[derive(Subcommand)]
pub enum LifecycleCommands {
    /// List lifecycle jobs with their status
    List,

    /// Deploy a lifecycle job
    Deploy {
        /// Lifecycle name
        #[arg(short = 'n', long = "name", visible_alias = "lifecycle")]
        name: String,

        /// Watch the lifecycle status until it's ready or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Stop a lifecycle job
    Stop {
        /// Lifecycle name
        #[arg(short = 'n', long = "name", visible_alias = "lifecycle")]
        name: String,

        /// Watch the lifecycle status until it's stopped or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Redeploy a lifecycle job
    Redeploy {
        /// Lifecycle name
        #[arg(short = 'n', long = "name", visible_alias = "lifecycle")]
        name: String,

        /// Watch the lifecycle status until it's ready or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Delete a lifecycle job
    Delete {
        /// Lifecycle name
        #[arg(short = 'n', long = "name", visible_alias = "lifecycle")]
        name: String,

        /// Watch the lifecycle status until it's deleted or an error occurs
        #[arg(short, long)]
        watch: bool,

        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Manage lifecycle environment variables and secrets
    Env {
        #[command(subcommand)]
        command: variable::EnvCommands,
    },
}

/// Execute a lifecycle command
pub async fn execute(command: LifecycleCommands, cmd: &CommandContext) -> CliResult<()> {
    let (name, action, flags) = match command {
        LifecycleCommands::List => return resource::list(cmd, KIND).await,
        LifecycleCommands::Env { command } => return variable::execute(command, KIND, cmd).await,
        LifecycleCommands::Deploy { name, watch } => (name, Action::Deploy, ActionFlags::watch(watch)),
        LifecycleCommands::Stop { name, watch } => (name, Action::Stop, ActionFlags::watch(watch)),
        LifecycleCommands::Redeploy { name, watch } => {
            (name, Action::Redeploy, ActionFlags::watch(watch))
        }
        LifecycleCommands::Delete { name, watch, yes } => {
            (name, Action::Delete, ActionFlags { watch, yes })
        }
    };

    let ctx = cmd.resolve().await?;
    let target = cmd.find_resource(&ctx, KIND, &name).await?;
    action::run(cmd, &ctx, &target, action, flags).await?;
    Ok(())
}

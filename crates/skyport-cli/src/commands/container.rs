//! Container commands

use super::action::{self, ActionFlags};
use super::{resource, variable, CommandContext};
use crate::error::CliResult;
use clap::Subcommand;
use skyport_types::{Action, ResourceKind};

const KIND: ResourceKind = ResourceKind::Container;

/// Container subcommands
#[derive(Subcommand)]
pub enum ContainerCommands {
    /// List containers with their status
    List,

    /// Deploy a container
    Deploy {
        /// Container name
        #[arg(short = 'n', long = "name", visible_alias = "container")]
        name: String,

        /// Watch the container status until it's ready or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Stop a container
    Stop {
        /// Container name
        #[arg(short = 'n', long = "name", visible_alias = "container")]
        name: String,

        /// Watch the container status until it's stopped or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Redeploy a container
    Redeploy {
        /// Container name
        #[arg(short = 'n', long = "name", visible_alias = "container")]
        name: String,

        /// Watch the container status until it's ready or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Delete a container
    Delete {
        /// Container name
        #[arg(short = 'n', long = "name", visible_alias = "container")]
        name: String,

        /// Watch the container status until it's deleted or an error occurs
        #[arg(short, long)]
        watch: bool,

        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Manage container environment variables and secrets
    Env {
        #[command(subcommand)]
        command: variable::EnvCommands,
    },
}

/// Execute a container command
pub async fn execute(command: ContainerCommands, cmd: &CommandContext) -> CliResult<()> {
    let (name, action, flags) = match command {
        ContainerCommands::List => return resource::list(cmd, KIND).await,
        ContainerCommands::Env { command } => return variable::execute(command, KIND, cmd).await,
        ContainerCommands::Deploy { name, watch } => (name, Action::Deploy, ActionFlags::watch(watch)),
        ContainerCommands::Stop { name, watch } => (name, Action::Stop, ActionFlags::watch(watch)),
        ContainerCommands::Redeploy { name, watch } => {
            (name, Action::Redeploy, ActionFlags::watch(watch))
        }
        ContainerCommands::Delete { name, watch, yes } => {
            (name, Action::Delete, ActionFlags { watch, yes })
        }
    };

    let ctx = cmd.resolve().await?;
    let target = cmd.find_resource(&ctx, KIND, &name).await?;
    action::run(cmd, &ctx, &target, action, flags).await?;
    Ok(())
}

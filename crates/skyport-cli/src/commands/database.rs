//! Database commands

use super::action::{self, ActionFlags};
use super::{resource, CommandContext};
use crate::error::CliResult;
use clap::Subcommand;
use skyport_types::{Action, ResourceKind};

const KIND: ResourceKind = ResourceKind::Database;

/// Database subcommands. Databases cannot be redeployed.
#[derive(Subcommand)]
pub enum DatabaseCommands {
    /// List databases with their status
    List,

    /// Deploy a database
    Deploy {
        /// Database name
        #[arg(short = 'n', long = "name", visible_alias = "database")]
        name: String,

        /// Watch the database status until it's ready or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Stop a database
    Stop {
        /// Database name
        #[arg(short = 'n', long = "name", visible_alias = "database")]
        name: String,

        /// Watch the database status until it's stopped or an error occurs
        #[arg(short, long)]
        watch: bool,
    },

    /// Delete a database
    Delete {
        /// Database name
        #[arg(short = 'n', long = "name", visible_alias = "database")]
        name: String,

        /// Watch the database status until it's deleted or an error occurs
        #[arg(short, long)]
        watch: bool,

        /// Skip confirmation
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Execute a database command
pub async fn execute(command: DatabaseCommands, cmd: &CommandContext) -> CliResult<()> {
    let (name, action, flags) = match command {
        DatabaseCommands::List => return resource::list(cmd, KIND).await,
        DatabaseCommands::Deploy { name, watch } => (name, Action::Deploy, ActionFlags::watch(watch)),
        DatabaseCommands::Stop { name, watch } => (name, Action::Stop, ActionFlags::watch(watch)),
        DatabaseCommands::Delete { name, watch, yes } => {
            (name, Action::Delete, ActionFlags { watch, yes })
        }
    };

    let ctx = cmd.resolve().await?;
    let target = cmd.find_resource(&ctx, KIND, &name).await?;
    action::run(cmd, &ctx, &target, action, flags).await?;
    Ok(())
}

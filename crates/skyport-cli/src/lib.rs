//! skyport CLI - Command-line interface for cloud deployments
//!
//! This CLI gives operators a terminal interface to:
//! - List applications, containers, databases, lifecycle jobs and brokers
//! - Deploy, stop, redeploy and delete them, or a whole environment
//! - Watch an operation until it settles
//! - Manage environment variables, secrets and aliases
//! - Read and follow application logs
//! - Compare local commits with what is deployed
//!
//! Every mutating command refuses to run while the environment already has an
//! operation in flight; see [`skyport_watch::PreflightGate`].

use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod git;
pub mod output;
pub mod progress;

use commands::{
    application, broker, container, database, deploy, environment, lifecycle, CommandContext,
};
use config::{CliConfig, Overrides, Settings};
pub use error::{CliError, CliResult};
use output::{print_error, print_info, print_success, print_warning};

/// skyport CLI application
#[derive(Parser)]
#[command(name = "skyport")]
#[command(about = "skyport - deploy and operate cloud environments", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "SKYPORT_CONFIG", global = true)]
    config: Option<String>,

    /// Control-plane endpoint
    #[arg(long, env = "SKYPORT_API_URL", global = true)]
    api_url: Option<String>,

    /// API token
    #[arg(long, env = "SKYPORT_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Organization name
    #[arg(long, global = true)]
    organization: Option<String>,

    /// Project name
    #[arg(short = 'p', long, global = true)]
    project: Option<String>,

    /// Environment name
    #[arg(long, global = true)]
    environment: Option<String>,

    /// Output format (table, json, yaml)
    #[arg(short, long, default_value = "table", global = true)]
    output: output::OutputFormat,

    /// Seconds between status polls while watching
    #[arg(long, global = true)]
    poll_interval: Option<u64>,

    /// Stop watching after this many seconds (0 waits indefinitely)
    #[arg(long, global = true)]
    watch_timeout: Option<u64>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Manage applications
    #[command(alias = "app")]
    Application {
        #[command(subcommand)]
        command: application::ApplicationCommands,
    },

    /// Manage containers
    Container {
        #[command(subcommand)]
        command: container::ContainerCommands,
    },

    /// Manage databases
    #[command(alias = "db")]
    Database {
        #[command(subcommand)]
        command: database::DatabaseCommands,
    },

    /// Manage lifecycle jobs
    Lifecycle {
        #[command(subcommand)]
        command: lifecycle::LifecycleCommands,
    },

    /// Manage the environment
    #[command(alias = "env")]
    Environment {
        #[command(subcommand)]
        command: environment::EnvironmentCommands,
    },

    /// Deployment history
    Deploy {
        #[command(subcommand)]
        command: deploy::DeployCommands,
    },

    /// Message brokers
    Broker {
        #[command(subcommand)]
        command: broker::BrokerCommands,
    },

    /// Check control-plane connectivity and credentials
    Status,

    /// Print the CLI version
    Version,
}

/// Parse the process arguments and run
pub async fn run() -> CliResult<()> {
    run_with_args(std::env::args_os()).await
}

/// Parse `args` (including the binary name) and run
pub async fn run_with_args<I, T>(args: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    // Initialize tracing; a second run in the same process keeps the first subscriber
    let filter = if cli.verbose { "debug" } else { "info" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();

    if let Commands::Version = cli.command {
        println!("skyport {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // Load config
    let config = CliConfig::load(cli.config.as_deref())?;
    let overrides = Overrides {
        api_url: cli.api_url,
        token: cli.token,
        organization: cli.organization,
        project: cli.project,
        environment: cli.environment,
        poll_interval_secs: cli.poll_interval,
        watch_timeout_secs: cli.watch_timeout,
    };
    let settings = Settings::merge(overrides, config);

    // Create client
    let client = client::ApiClient::new(&settings)?;
    let interactive = std::io::stdout().is_terminal();
    let cmd = CommandContext::new(client, settings, cli.output, interactive);

    // Execute command
    match cli.command {
        Commands::Application { command } => application::execute(command, &cmd).await,
        Commands::Container { command } => container::execute(command, &cmd).await,
        Commands::Database { command } => database::execute(command, &cmd).await,
        Commands::Lifecycle { command } => lifecycle::execute(command, &cmd).await,
        Commands::Environment { command } => environment::execute(command, &cmd).await,
        Commands::Deploy { command } => deploy::execute(command, &cmd).await,
        Commands::Broker { command } => broker::execute(command, &cmd).await,
        Commands::Status => {
            let organizations = cmd.client.list_organizations().await?;
            print_success(&format!("Connected to {}", cmd.settings.api_url));
            print_info(&format!("{} organization(s) visible", organizations.len()));
            Ok(())
        }
        Commands::Version => Ok(()),
    }
}

/// Print an error and its follow-up hint to stderr
pub fn report_failure(error: &CliError) {
    match error {
        CliError::Interrupted { .. } => print_warning(&error.to_string()),
        _ => print_error(&error.to_string()),
    }
    if let Some(hint) = error.hint() {
        eprintln!("  {}", hint);
    }
}

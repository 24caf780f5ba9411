//! Deployment history: recent commits of a branch and which one is running

use super::CommandContext;
use crate::context;
use crate::error::{CliError, CliResult};
use crate::git::{CommitInfo, LocalRepository};
use crate::output::{format_timestamp, print_output};
use clap::Subcommand;
use serde::Serialize;
use skyport_types::{Application, Named, ResourceKind};
use std::path::PathBuf;
use tabled::Tabled;
use tracing::debug;

/// Deploy subcommands
#[derive(Subcommand)]
pub enum DeployCommands {
    /// List recent commits of a branch and mark the deployed one
    List {
        /// Application name
        #[arg(short = 'a', long)]
        application: String,

        /// Branch to read; defaults to the checked-out branch
        #[arg(short = 'b', long)]
        branch: Option<String>,

        /// Repository to read commits from
        #[arg(long, default_value = ".")]
        repo: PathBuf,

        /// Number of commits to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

/// Table row for one commit
#[derive(Debug, Serialize, Tabled)]
pub struct DeploymentRow {
    #[tabled(rename = "Branch")]
    pub branch: String,
    #[tabled(rename = "Commit Date")]
    pub commit_date: String,
    #[tabled(rename = "Commit Id")]
    pub commit_id: String,
    #[tabled(rename = "Author")]
    pub author: String,
    #[tabled(rename = "Deployed")]
    pub deployed: String,
}

/// Execute a deploy command
pub async fn execute(command: DeployCommands, cmd: &CommandContext) -> CliResult<()> {
    match command {
        DeployCommands::List {
            application,
            branch,
            repo,
            limit,
        } => {
            // Read the repository up front; it is not held across requests
            let (branch, commits) = {
                let local = LocalRepository::discover(&repo)?;
                let branch = match branch {
                    Some(branch) => branch,
                    None => local.current_branch()?,
                };
                let commits = local.recent_commits(&branch, limit)?;
                (branch, commits)
            };

            // An environment is named after its branch unless one is given
            let mut settings = cmd.settings.clone();
            if settings.environment.is_none() {
                settings.environment = Some(branch.clone());
            }
            let ctx = context::resolve(&cmd.client, &settings).await?;

            let applications = cmd.client.list_applications(&ctx.environment_id).await?;
            let app = Application::find_by_name(&applications, &application).ok_or_else(|| {
                CliError::ResourceNotFound {
                    kind: ResourceKind::Application,
                    name: application.clone(),
                }
            })?;
            debug!(
                application = %app.name(),
                deployed = ?app.deployed_commit_id,
                commits = commits.len(),
                "deployment history"
            );

            let rows = deployment_rows(&branch, &commits, app.deployed_commit_id.as_deref());
            print_output(rows, cmd.format)
        }
    }
}

fn deployment_rows(
    branch: &str,
    commits: &[CommitInfo],
    deployed: Option<&str>,
) -> Vec<DeploymentRow> {
    commits
        .iter()
        .map(|commit| DeploymentRow {
            branch: branch.to_string(),
            commit_date: format_timestamp(commit.date),
            commit_id: commit.id.clone(),
            author: commit.author.clone(),
            deployed: if deployed.is_some_and(|id| commit.matches(id)) {
                "✓".to_string()
            } else {
                String::new()
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::tests::{commit, init_repo};

    #[test]
    fn test_rows_mark_deployed_commit() {
        let (dir, repo) = init_repo("main");
        let deployed = commit(&repo, "Ada", 1_714_557_600);
        commit(&repo, "Grace", 1_714_561_200);

        let commits = LocalRepository::discover(dir.path())
            .unwrap()
            .recent_commits("main", 10)
            .unwrap();
        let rows = deployment_rows("main", &commits, Some(&deployed.to_string()));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].author, "Grace");
        assert_eq!(rows[0].deployed, "");
        assert_eq!(rows[1].commit_id, deployed.to_string());
        assert_eq!(rows[1].commit_date, "2024-05-01 10:00:00");
        assert_eq!(rows[1].deployed, "✓");
        assert!(rows.iter().all(|row| row.branch == "main"));
    }

    #[test]
    fn test_nothing_deployed() {
        let commits = vec![CommitInfo {
            id: "4f2a9c1d0e".into(),
            author: "Ada".into(),
            date: None,
        }];
        let rows = deployment_rows("main", &commits, None);
        assert_eq!(rows[0].deployed, "");
        assert_eq!(rows[0].commit_date, "-");
    }
}

//! Local repository history, compared against what is deployed

use crate::error::{CliError, CliResult};
use chrono::{DateTime, Utc};
use git2::{BranchType, Commit, Repository, Sort};
use std::path::Path;
use tracing::debug;

/// One commit as shown in the deployment history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: String,
    pub author: String,
    pub date: Option<DateTime<Utc>>,
}

impl CommitInfo {
    fn from_commit(commit: &Commit<'_>) -> Self {
        let author = commit.author();
        Self {
            id: commit.id().to_string(),
            author: author.name().unwrap_or("unknown").to_string(),
            date: DateTime::from_timestamp(author.when().seconds(), 0),
        }
    }

    /// Whether this is the commit identified by `id`, full or abbreviated
    pub fn matches(&self, id: &str) -> bool {
        !id.is_empty() && self.id.starts_with(id)
    }
}

/// The git repository a command runs from
pub struct LocalRepository {
    repo: Repository,
}

impl LocalRepository {
    /// Find the repository containing `path`
    pub fn discover(path: &Path) -> CliResult<Self> {
        let repo = Repository::discover(path).map_err(|e| {
            CliError::InvalidInput(format!(
                "{} is not inside a git repository ({})",
                path.display(),
                e.message()
            ))
        })?;
        debug!(path = %repo.path().display(), "opened repository");
        Ok(Self { repo })
    }

    /// Branch HEAD points at
    pub fn current_branch(&self) -> CliResult<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(CliError::InvalidInput(
                "HEAD is detached; pass --branch".into(),
            ));
        }
        head.shorthand()
            .map(str::to_string)
            .ok_or_else(|| CliError::InvalidInput("branch name is not valid UTF-8".into()))
    }

    /// Newest `limit` commits reachable from `branch`, local or `origin/<branch>`
    pub fn recent_commits(&self, branch: &str, limit: usize) -> CliResult<Vec<CommitInfo>> {
        let found = self
            .repo
            .find_branch(branch, BranchType::Local)
            .or_else(|_| {
                self.repo
                    .find_branch(&format!("origin/{}", branch), BranchType::Remote)
            })?;
        let tip = found.get().peel_to_commit()?;

        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        walk.push(tip.id())?;

        walk.take(limit)
            .map(|oid| -> CliResult<CommitInfo> {
                let commit = self.repo.find_commit(oid?)?;
                Ok(CommitInfo::from_commit(&commit))
            })
            .collect()
    }
}

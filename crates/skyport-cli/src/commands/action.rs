//! Deploy / stop / redeploy / delete, shared by every resource kind

use super::CommandContext;
use crate::context::ResolvedContext;
use crate::error::{CliError, CliResult};
use crate::output::{print_error, OutputFormat};
use crate::progress::ProgressReporter;
use colored::*;
use skyport_types::{Action, ResourceRef};
use skyport_watch::{OperationWatcher, PreflightGate, SilentReporter, WatchReporter};
use tracing::info;

/// Flags every mutating command accepts
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionFlags {
    /// Follow the operation until it settles
    pub watch: bool,
    /// Skip the delete confirmation
    pub yes: bool,
}

impl ActionFlags {
    pub fn watch(watch: bool) -> Self {
        Self { watch, yes: false }
    }
}

/// Submit `action` on `target` and optionally watch it to completion.
///
/// Returns `Ok(false)` when the user declined a delete.
pub async fn run(
    cmd: &CommandContext,
    ctx: &ResolvedContext,
    target: &ResourceRef,
    action: Action,
    flags: ActionFlags,
) -> CliResult<bool> {
    if !action.supported_by(target.kind) {
        return Err(CliError::InvalidInput(format!(
            "{} is not available for a {}",
            action,
            target.kind.label()
        )));
    }

    if action == Action::Delete && !flags.yes && !confirm_delete(target) {
        print_error("Aborted");
        return Ok(false);
    }

    PreflightGate::new(&cmd.client)
        .ensure_environment_terminal(&ctx.environment_id)
        .await?;

    cmd.client.submit(target, action).await?;
    info!(resource = %target, %action, "operation submitted");
    if cmd.format == OutputFormat::Table {
        println!(
            "{} {} {} in progress..",
            action.progressive(),
            target.kind.label(),
            target.name.blue()
        );
    }

    if flags.watch {
        watch(cmd, ctx, target, action).await?;
    }
    Ok(true)
}

/// Poll `target` until `action` settles; Ctrl-C stops watching without
/// touching the remote operation.
pub async fn watch(
    cmd: &CommandContext,
    ctx: &ResolvedContext,
    target: &ResourceRef,
    action: Action,
) -> CliResult<()> {
    let progress = progress_reporter(cmd.format, cmd.interactive);
    let reporter: &dyn WatchReporter = match &progress {
        Some(progress) => progress,
        None => &SilentReporter,
    };
    let watcher = OperationWatcher::new(&cmd.client, cmd.settings.watch.clone());

    tokio::select! {
        result = watcher.watch(target, action, &ctx.environment_id, reporter) => {
            result?;
            Ok(())
        }
        Ok(()) = tokio::signal::ctrl_c() => {
            if let Some(progress) = &progress {
                progress.abandon();
            }
            Err(CliError::Interrupted {
                resource: target.to_string(),
            })
        }
    }
}

/// Structured output stays parseable: progress is only rendered for tables
fn progress_reporter(format: OutputFormat, interactive: bool) -> Option<ProgressReporter> {
    (format == OutputFormat::Table).then(|| ProgressReporter::new(interactive))
}

fn confirm_delete(target: &ResourceRef) -> bool {
    dialoguer::Confirm::new()
        .with_prompt(format!("Delete {}? This cannot be undone.", target))
        .default(false)
        .interact()
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_progress_for_structured_output() {
        assert!(progress_reporter(OutputFormat::Json, true).is_none());
        assert!(progress_reporter(OutputFormat::Yaml, false).is_none());
        assert!(progress_reporter(OutputFormat::Table, false).is_some());
    }
}

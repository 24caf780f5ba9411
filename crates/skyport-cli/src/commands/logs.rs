//! Application logs

use super::CommandContext;
use crate::context::ResolvedContext;
use crate::error::CliResult;
use crate::output::OutputFormat;
use colored::*;
use skyport_types::{LogLine, Logs, ResourceKind, ResourceRef};
use tracing::debug;

/// Print the last `lines` log lines of an application, then optionally keep
/// polling for newer ones until Ctrl-C.
pub async fn execute(cmd: &CommandContext, name: &str, lines: u32, follow: bool) -> CliResult<()> {
    let ctx = cmd.resolve().await?;
    let target = cmd
        .find_resource(&ctx, ResourceKind::Application, name)
        .await?;

    let logs = cmd
        .client
        .application_logs(&ctx.project_id, &ctx.environment_id, &target.id, lines)
        .await?;
    print_lines(&logs, cmd.format)?;

    if !follow {
        return Ok(());
    }

    let cursor = logs.last_id().map(str::to_string);
    tokio::select! {
        result = follow_logs(cmd, &ctx, &target, lines, cursor) => result,
        Ok(()) = tokio::signal::ctrl_c() => {
            debug!(resource = %target, "stopped following logs");
            Ok(())
        }
    }
}

async fn follow_logs(
    cmd: &CommandContext,
    ctx: &ResolvedContext,
    target: &ResourceRef,
    lines: u32,
    mut cursor: Option<String>,
) -> CliResult<()> {
    let interval = cmd.settings.watch.poll_interval;
    loop {
        tokio::time::sleep(interval).await;

        let logs = match &cursor {
            Some(last_id) => {
                cmd.client
                    .tail_application_logs(&ctx.project_id, &ctx.environment_id, &target.id, last_id)
                    .await?
            }
            None => {
                cmd.client
                    .application_logs(&ctx.project_id, &ctx.environment_id, &target.id, lines)
                    .await?
            }
        };
        print_lines(&logs, cmd.format)?;
        if let Some(last_id) = logs.last_id() {
            cursor = Some(last_id.to_string());
        }
    }
}

fn print_lines(logs: &Logs, format: OutputFormat) -> CliResult<()> {
    for line in &logs.results {
        match format {
            OutputFormat::Table => println!("{}", render(line)),
            OutputFormat::Json => println!("{}", serde_json::to_string(line)?),
            // One document per line keeps followed output streamable
            OutputFormat::Yaml => print!("---\n{}", serde_yaml::to_string(line)?),
        }
    }
    Ok(())
}

fn render(line: &LogLine) -> String {
    format!(
        "{} {}",
        line.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
        line.message
    )
}

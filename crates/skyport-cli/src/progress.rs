//! Watch progress rendering

use crate::output::{colorize_state, humanize_duration, print_success};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use skyport_types::ResourceStatus;
use skyport_watch::{WatchError, WatchReporter, WatchSession};
use std::time::Duration;
use tracing::debug;

/// Spinner on a terminal, one line per poll otherwise
pub struct ProgressReporter {
    bar: ProgressBar,
    interactive: bool,
}

impl ProgressReporter {
    pub fn new(interactive: bool) -> Self {
        let bar = if interactive {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                bar.set_style(style);
            }
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        } else {
            ProgressBar::hidden()
        };
        bar.set_message("Waiting for the operation to start...");
        Self { bar, interactive }
    }

    /// Ctrl-C: stop rendering, the remote operation is left alone
    pub fn abandon(&self) {
        self.bar.abandon();
    }

    fn line(session: &WatchSession, status: &ResourceStatus) -> String {
        format!(
            "{} is {} ({})",
            session.target().to_string().bold(),
            colorize_state(&status.state),
            humanize_duration(session.elapsed())
        )
    }
}

impl WatchReporter for ProgressReporter {
    fn progress(&self, session: &WatchSession, status: &ResourceStatus) {
        let line = Self::line(session, status);
        if self.interactive {
            self.bar.set_message(line);
        } else {
            println!("{} {}", "…".dimmed(), line);
        }
    }

    fn succeeded(&self, session: &WatchSession, status: &ResourceStatus) {
        self.bar.finish_and_clear();
        print_success(&Self::line(session, status));
    }

    // The error itself is printed by the caller once the command unwinds
    fn failed(&self, session: &WatchSession, error: &WatchError) {
        self.bar.finish_and_clear();
        debug!(polls = session.polls(), %error, "watch ended without success");
    }
}

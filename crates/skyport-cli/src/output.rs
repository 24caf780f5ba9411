//! Output formatting utilities

use crate::error::CliResult;
use colored::*;
use serde::Serialize;
use skyport_types::StatusCode;
use skyport_watch::{classify, Classification};
use tabled::{Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Print a vector of items in the specified format
pub fn print_output<T: Serialize + Tabled>(data: Vec<T>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                println!("{}", "No results".dimmed());
            } else {
                let table = Table::new(data).to_string();
                println!("{}", table);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(&data)?);
        }
    }
    Ok(())
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Status code coloured by its classification
pub fn colorize_state(state: &StatusCode) -> ColoredString {
    let text = state.as_str();
    if state.is_unknown() {
        return text.dimmed();
    }
    match classify(state) {
        Classification::Success => text.green(),
        Classification::Failure => text.red(),
        Classification::Running => text.yellow(),
    }
}

/// Short human form of a duration: `42s`, `3m 05s`, `1h 02m`
pub fn humanize_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 3600 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else if secs >= 60 {
        format!("{}m {:02}s", secs / 60, secs % 60)
    } else {
        format!("{}s", secs)
    }
}

/// Timestamp column value, `-` when unknown
pub fn format_timestamp(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_output_format_default() {
        let format = OutputFormat::default();
        assert!(matches!(format, OutputFormat::Table));
    }

    #[test]
    fn test_humanize_duration() {
        assert_eq!(humanize_duration(Duration::from_secs(42)), "42s");
        assert_eq!(humanize_duration(Duration::from_secs(185)), "3m 05s");
        assert_eq!(humanize_duration(Duration::from_secs(3720)), "1h 02m");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(None), "-");
        let at = chrono::DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        assert_eq!(format_timestamp(Some(at)), "2024-05-01 10:00:00");
    }
}

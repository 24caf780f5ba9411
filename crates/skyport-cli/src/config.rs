//! CLI configuration

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use skyport_watch::WatchConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Control plane used when neither flag, env var nor config file names one
pub const DEFAULT_API_URL: &str = "https://api.skyport.dev";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// CLI configuration file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    /// Control-plane endpoint
    pub api_url: Option<String>,

    /// Bearer token
    pub token: Option<String>,

    /// Default organization name
    pub organization: Option<String>,

    /// Default project name
    pub project: Option<String>,

    /// Default environment name
    pub environment: Option<String>,

    /// Delay between status polls in seconds
    pub poll_interval_secs: Option<u64>,

    /// Give up watching after this many seconds
    pub watch_timeout_secs: Option<u64>,

    /// Request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_config_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::Config("Cannot find config directory".into()))?;
        Ok(config_dir.join("skyport").join("config.toml"))
    }
}

/// Values given on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub token: Option<String>,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub environment: Option<String>,
    pub poll_interval_secs: Option<u64>,
    pub watch_timeout_secs: Option<u64>,
}

/// Effective settings handed to every command
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub token: Option<String>,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub environment: Option<String>,
    pub watch: WatchConfig,
    pub request_timeout: Duration,
}

impl Settings {
    /// Command-line values win over the config file
    pub fn merge(overrides: Overrides, config: CliConfig) -> Self {
        let poll_interval = overrides
            .poll_interval_secs
            .or(config.poll_interval_secs)
            .map(Duration::from_secs)
            .unwrap_or(WatchConfig::DEFAULT_POLL_INTERVAL);
        let max_duration = overrides
            .watch_timeout_secs
            .or(config.watch_timeout_secs)
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        Self {
            api_url: overrides
                .api_url
                .or(config.api_url)
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token: overrides.token.or(config.token).filter(|t| !t.is_empty()),
            organization: overrides.organization.or(config.organization),
            project: overrides.project.or(config.project),
            environment: overrides.environment.or(config.environment),
            watch: WatchConfig::default()
                .with_poll_interval(poll_interval)
                .with_max_duration(max_duration),
            request_timeout: Duration::from_secs(
                config
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        }
    }

    pub fn token(&self) -> CliResult<&str> {
        self.token.as_deref().ok_or(CliError::MissingToken)
    }
}

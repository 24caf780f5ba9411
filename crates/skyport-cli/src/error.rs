//! CLI error types

use skyport_types::ResourceKind;
use skyport_watch::WatchError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No credential available
    #[error("No API token configured")]
    MissingToken,

    /// API error response
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Credential rejected by the control plane
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A name given on the command line matched nothing
    #[error("{kind} {name} not found")]
    ResourceNotFound {
        /// What was looked up
        kind: ResourceKind,
        /// The name the user typed
        name: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Preflight rejection, remote failure or broken watch
    #[error(transparent)]
    Watch(#[from] WatchError),

    /// Ctrl-C while watching
    #[error("Stopped watching {resource}; the operation continues on the control plane")]
    Interrupted {
        /// What was being watched
        resource: String,
    },

    /// Local repository error
    #[error("Git error: {}", .0.message())]
    Git(#[from] git2::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Interrupted { .. } => 130,
            _ => 1,
        }
    }

    /// Follow-up advice printed under the error, if any
    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::ResourceNotFound { kind, .. } => Some(format!(
                "You can list all {}s with: skyport {} list",
                kind.label(),
                kind.label()
            )),
            CliError::MissingToken => {
                Some("Pass --token, set SKYPORT_TOKEN, or add `token` to the config file".into())
            }
            CliError::Unauthorized(_) => Some("Check that your API token is still valid".into()),
            _ => None,
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

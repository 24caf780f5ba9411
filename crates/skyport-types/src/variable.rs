//! Environment variables, secrets and aliases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Level at which a variable is defined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariableScope {
    Project,
    Environment,
    Application,
    Container,
    Job,
}

impl VariableScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariableScope::Project => "PROJECT",
            VariableScope::Environment => "ENVIRONMENT",
            VariableScope::Application => "APPLICATION",
            VariableScope::Container => "CONTAINER",
            VariableScope::Job => "JOB",
        }
    }
}

impl fmt::Display for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown scope '{0}', expected one of PROJECT, ENVIRONMENT, APPLICATION, CONTAINER, JOB")]
pub struct ParseScopeError(String);

impl FromStr for VariableScope {
    type Err = ParseScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PROJECT" => Ok(VariableScope::Project),
            "ENVIRONMENT" => Ok(VariableScope::Environment),
            "APPLICATION" => Ok(VariableScope::Application),
            "CONTAINER" => Ok(VariableScope::Container),
            "JOB" => Ok(VariableScope::Job),
            _ => Err(ParseScopeError(s.to_string())),
        }
    }
}

/// A variable or secret as listed on a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub id: String,
    pub key: String,
    /// Absent for secrets
    #[serde(default)]
    pub value: Option<String>,
    pub scope: VariableScope,
}

/// Body of a variable or secret creation request
#[derive(Debug, Clone, Serialize)]
pub struct VariableRequest {
    pub key: String,
    pub value: String,
}

/// Body of an alias creation request; `key` is the alias name
#[derive(Debug, Clone, Serialize)]
pub struct AliasRequest {
    pub key: String,
}

//! Application log lines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLine {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Logs {
    #[serde(default)]
    pub results: Vec<LogLine>,
}

impl Logs {
    /// Id of the newest line, used as the cursor when tailing
    pub fn last_id(&self) -> Option<&str> {
        self.results.last().map(|line| line.id.as_str())
    }
}

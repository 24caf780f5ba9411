//! Broker commands

use super::CommandContext;
use crate::error::CliResult;
use crate::output::print_output;
use clap::Subcommand;
use serde::Serialize;
use skyport_types::Broker;
use tabled::Tabled;

/// Broker subcommands
#[derive(Subcommand)]
pub enum BrokerCommands {
    /// List the brokers of the environment
    List,
}

/// Table row for broker display
#[derive(Debug, Serialize, Tabled)]
struct BrokerRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    kind: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Endpoint")]
    endpoint: String,
    #[tabled(rename = "Port")]
    port: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Applications")]
    applications: String,
}

impl From<Broker> for BrokerRow {
    fn from(broker: Broker) -> Self {
        let applications = broker.application_names();
        let applications = if applications.is_empty() {
            "none".to_string()
        } else {
            applications.join(", ")
        };

        Self {
            status: broker
                .status
                .as_ref()
                .map(|s| s.code_message.clone())
                .unwrap_or_else(|| "-".to_string()),
            kind: dash(broker.kind.as_deref()),
            version: dash(broker.version.as_deref()),
            endpoint: dash(broker.fqdn.as_deref()),
            port: broker
                .port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            username: dash(broker.username.as_deref()),
            applications,
            name: broker.name,
        }
    }
}

fn dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// Execute a broker command
pub async fn execute(command: BrokerCommands, cmd: &CommandContext) -> CliResult<()> {
    match command {
        BrokerCommands::List => {
            let ctx = cmd.resolve().await?;
            let brokers = cmd
                .client
                .list_brokers(&ctx.project_id, &ctx.environment_id)
                .await?;
            let rows: Vec<BrokerRow> = brokers.into_iter().map(BrokerRow::from).collect();
            print_output(rows, cmd.format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broker_row_without_applications() {
        let broker: Broker = serde_json::from_value(serde_json::json!({
            "id": "b-1",
            "name": "events",
            "type": "RABBITMQ",
            "port": 5672,
            "status": { "code_message": "RUNNING" }
        }))
        .unwrap();

        let row = BrokerRow::from(broker);
        assert_eq!(row.name, "events");
        assert_eq!(row.kind, "RABBITMQ");
        assert_eq!(row.port, "5672");
        assert_eq!(row.status, "RUNNING");
        assert_eq!(row.endpoint, "-");
        assert_eq!(row.applications, "none");
    }

    #[test]
    fn test_broker_row_lists_applications() {
        let broker: Broker = serde_json::from_value(serde_json::json!({
            "id": "b-1",
            "name": "events",
            "applications": [{ "name": "api" }, { "name": "worker" }]
        }))
        .unwrap();

        assert_eq!(BrokerRow::from(broker).applications, "api, worker");
    }
}

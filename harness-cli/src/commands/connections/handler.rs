use cli_table::{print_stdout, Table, WithTitle};

use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::debug;

use identity_harness_core::agent::admin::response::field_str;
use identity_harness_core::agent::admin::types::{AdminAPI, AdminRequest};

use crate::commands::agents::get_agent_client;
use crate::commands::handler::ContextHandler;
use crate::types::CliError;

use super::ConnectionsCommands;

#[derive(Table, Debug, PartialEq)]
pub(crate) struct ConnectionRow {
    #[table(title = "Connection ID")]
    connection_id: String,
    #[table(title = "State")]
    state: String,
    #[table(title = "Their Label")]
    their_label: String,
    #[table(title = "Alias")]
    alias: String,
}

impl ConnectionRow {
    fn from_value(value: &Value) -> Self {
        let read = |field: &str| field_str(value, field).unwrap_or(String::from("-"));

        Self {
            connection_id: read("connection_id"),
            state: read("state"),
            their_label: read("their_label"),
            alias: read("alias"),
        }
    }
}

pub(crate) fn build_rows(response: &Value) -> Vec<ConnectionRow> {
    response
        .get("results")
        .and_then(|results| results.as_array())
        .map(|results| results.iter().map(ConnectionRow::from_value).collect())
        .unwrap_or_default()
}

pub async fn handle_commands(
    ctx: &ContextHandler,
    commands: ConnectionsCommands,
) -> Result<(), CliError> {
    debug!("connections command handler triggered...");

    match commands {
        ConnectionsCommands::List(args) => {
            let client = get_agent_client(ctx)?;

            let mut request = AdminRequest::get("/connections");
            if let Some(state) = args.state {
                request = request.with_param("state", state);
            }

            if let Some(alias) = args.alias {
                request = request.with_param("alias", alias);
            }

            let response = client
                .send(request)
                .await
                .map_err(|err| CliError::AdminError(err.to_string()))?;

            print_stdout(build_rows(&response).with_title())
                .map_err(|err| CliError::AdminError(err.to_string()))?;
        }
    }

    Ok(())
}

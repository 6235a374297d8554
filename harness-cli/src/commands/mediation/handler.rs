use std::time::Duration;

use rst_common::standard::serde_json::json;
use rst_common::with_logging::log::debug;

use identity_harness_core::agent::admin::response::required_str;
use identity_harness_core::agent::admin::types::{AdminAPI, AdminRequest};
use identity_harness_core::agent::mediation::types::{
    MediationRequestID, PollConfig, TokioDelay,
};
use identity_harness_core::agent::mediation::GrantPoller;

use crate::commands::agents::get_agent_client;
use crate::commands::handler::ContextHandler;
use crate::types::CliError;
use crate::utils::output::print_json;

use super::MediationCommands;

pub async fn handle_commands(
    ctx: &ContextHandler,
    commands: MediationCommands,
) -> Result<(), CliError> {
    debug!("mediation command handler triggered...");
    let client = get_agent_client(ctx)?;

    match commands {
        MediationCommands::Status(args) => {
            let response = client
                .send(AdminRequest::get(format!(
                    "/mediation/requests/{}",
                    args.request_id
                )))
                .await
                .map_err(|err| CliError::AdminError(err.to_string()))?;

            print_json(&response)?;
        }
        MediationCommands::Request(args) => {
            let response = client
                .send(
                    AdminRequest::post(format!("/mediation/request/{}", args.connection_id))
                        .with_body(json!({})),
                )
                .await
                .map_err(|err| CliError::AdminError(err.to_string()))?;

            let request_id = required_str(&response, "mediation_id")
                .map(MediationRequestID::from)
                .map_err(|err| CliError::AdminError(err.to_string()))?;
            println!("mediation request: {request_id}");

            let poller = GrantPoller::new(
                client,
                TokioDelay,
                PollConfig::new(args.attempts, Duration::from_millis(args.delay_ms)),
            );

            let state = poller.poll(&request_id).await.map_err(CliError::from)?;
            println!("mediation state: {state}");
        }
    }

    Ok(())
}

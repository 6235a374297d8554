use rst_common::with_logging::log::debug;

use identity_harness_core::agent::admin::types::AdminAPI;
use identity_harness_core::agent::connection::build_request;
use identity_harness_core::agent::connection::types::{
    InvitationMode, InvitationRecord, ReceiveInvitation,
};

use crate::commands::agents::get_agent_client;
use crate::commands::handler::ContextHandler;
use crate::types::CliError;
use crate::utils::output::{parse_json, print_json, render_qr};

use super::InvitationCommands;

pub async fn handle_commands(
    ctx: &ContextHandler,
    commands: InvitationCommands,
) -> Result<(), CliError> {
    debug!("invitation command handler triggered...");
    let client = get_agent_client(ctx)?;

    let (mode, qr) = match commands {
        InvitationCommands::Create(args) => (args.to_mode(), args.qr),
        InvitationCommands::Receive(args) => {
            let invitation = parse_json(&args.invitation)?;
            let mode = InvitationMode::Receive(
                ReceiveInvitation::new(invitation).with_reuse_connections(args.reuse_connections),
            );
            (mode, false)
        }
    };

    let request = build_request(&mode);
    debug!("[invitation] {} {}", request.method(), request.path());

    let response = client
        .send(request)
        .await
        .map_err(|err| CliError::AdminError(err.to_string()))?;

    let record = InvitationRecord::from_response(response);
    if let Some(invitation) = record.invitation() {
        print_json(invitation)?;
    }

    if let Some(url) = record.invitation_url() {
        println!("invitation url: {url}");
        if qr {
            println!("{}", render_qr(url)?);
        }
    }

    if let Some(connection_id) = record.connection_id() {
        println!("connection id: {connection_id}");
    }

    Ok(())
}

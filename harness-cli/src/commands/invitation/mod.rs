use clap::{Args, Subcommand};

use identity_harness_core::agent::connection::types::{
    CreateInvitation, HandshakeProtocol, InvitationMode,
};

mod handler;

pub use handler::handle_commands as invitation_handler;

#[derive(Args, Clone)]
pub struct InvitationArgs {
    #[command(subcommand)]
    pub commands: InvitationCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Invitation")]
pub enum InvitationCommands {
    Create(InvitationCreateArgs),
    Receive(InvitationReceiveArgs),
}

#[derive(Args, Clone, Default)]
pub struct InvitationCreateArgs {
    #[arg(long)]
    alias: Option<String>,

    /// create an out-of-band invitation instead of a connections one
    #[arg(long)]
    oob: bool,

    /// use the RFC 0160 handshake for out-of-band invitations
    #[arg(long)]
    connections_protocol: bool,

    #[arg(long)]
    multi_use: bool,

    #[arg(long)]
    reuse_connections: bool,

    /// also print the invitation url as a QR code
    #[arg(long)]
    pub(crate) qr: bool,
}

impl InvitationCreateArgs {
    pub(crate) fn to_mode(&self) -> InvitationMode {
        let opts = match (self.oob, self.connections_protocol) {
            (false, _) => CreateInvitation::legacy(),
            (true, false) => CreateInvitation::out_of_band(HandshakeProtocol::DidExchange),
            (true, true) => CreateInvitation::out_of_band(HandshakeProtocol::Connections),
        };

        let opts = opts
            .with_multi_use(self.multi_use)
            .with_reuse_connections(self.reuse_connections);

        match &self.alias {
            Some(alias) => InvitationMode::Create(opts.with_alias(alias)),
            None => InvitationMode::Create(opts),
        }
    }
}

#[derive(Args, Clone)]
pub struct InvitationReceiveArgs {
    /// invitation JSON
    #[arg(long, required(true))]
    invitation: String,

    #[arg(long)]
    reuse_connections: bool,
}

use clap::{Args, Subcommand};

mod handler;

pub use handler::handle_commands as connections_handler;

#[derive(Args, Clone)]
pub struct ConnectionsArgs {
    #[command(subcommand)]
    pub commands: ConnectionsCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Connections")]
pub enum ConnectionsCommands {
    List(ConnectionsListArgs),
}

#[derive(Args, Clone)]
pub struct ConnectionsListArgs {
    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    alias: Option<String>,
}

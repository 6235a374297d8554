use clap::{Args, Subcommand};

mod handler;

pub use handler::handle_commands as mediation_handler;

#[derive(Args, Clone)]
pub struct MediationArgs {
    #[command(subcommand)]
    pub commands: MediationCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Mediation")]
pub enum MediationCommands {
    Status(MediationStatusArgs),
    Request(MediationRequestArgs),
}

#[derive(Args, Clone)]
pub struct MediationStatusArgs {
    #[arg(long, required(true))]
    request_id: String,
}

#[derive(Args, Clone)]
pub struct MediationRequestArgs {
    /// wallet connection to the mediator
    #[arg(long, required(true))]
    connection_id: String,

    #[arg(long, default_value_t = 3)]
    attempts: u32,

    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

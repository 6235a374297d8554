use clap::{Args, Subcommand, ValueEnum};

use identity_harness_core::ca::types::IdentityRole;

mod handler;

pub use handler::handle_commands as ca_handler;

#[derive(Args, Clone)]
pub struct CaArgs {
    /// harness configuration file, read for its `[ca]` section
    #[arg(long, value_name = "FILE", required(true))]
    pub config: String,

    #[command(subcommand)]
    pub commands: CaCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "CA")]
pub enum CaCommands {
    Enroll,
    EnrollMsp(CaEnrollMspArgs),
    Register(CaRegisterArgs),
}

#[derive(Args, Clone)]
pub struct CaEnrollMspArgs {
    #[arg(long, required(true))]
    msp_dir: String,
}

#[derive(Args, Clone)]
pub struct CaRegisterArgs {
    #[arg(long, required(true))]
    name: String,

    #[arg(long, required(true))]
    secret: String,

    /// raw `--id.attrs` value, ignored when a role is given
    #[arg(long)]
    attrs: Option<String>,

    #[arg(long, value_enum)]
    role: Option<RoleArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum RoleArg {
    FlAdmin,
    Trainer,
    Aggregator,
    LeadAggregator,
}

impl From<RoleArg> for IdentityRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::FlAdmin => IdentityRole::FlAdmin,
            RoleArg::Trainer => IdentityRole::Trainer,
            RoleArg::Aggregator => IdentityRole::Aggregator,
            RoleArg::LeadAggregator => IdentityRole::LeadAggregator,
        }
    }
}

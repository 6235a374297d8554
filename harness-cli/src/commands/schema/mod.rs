use clap::{Args, Subcommand};

mod handler;

pub use handler::handle_commands as schema_handler;

#[derive(Args, Clone)]
pub struct SchemaArgs {
    #[command(subcommand)]
    pub commands: SchemaCommands,
}

#[derive(Subcommand, Clone)]
#[command(subcommand_help_heading = "Schema")]
pub enum SchemaCommands {
    Publish(SchemaPublishArgs),
}

#[derive(Args, Clone)]
pub struct SchemaPublishArgs {
    #[arg(long, required(true))]
    name: String,

    /// generated as `a.b.c` when missing
    #[arg(long)]
    version: Option<String>,

    #[arg(long = "attr", required(true))]
    attributes: Vec<String>,

    #[arg(long)]
    tag: Option<String>,

    #[arg(long)]
    revocation: bool,

    /// overrides `[ledger] tails_file_count` of `--config`
    #[arg(long)]
    tails_file_count: Option<u32>,

    /// harness configuration file, read for its `[ledger]` section
    #[arg(long, value_name = "FILE")]
    config: Option<String>,
}

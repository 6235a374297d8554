use clap::{Parser, Subcommand};
use rst_common::with_tokio::tokio;
use rst_common::with_tracing::tracing_subscriber::{
    self, layer::SubscriberExt, util::SubscriberInitExt,
};

use identity_harness_cli::commands::agents::{agent_handler, AgentArgs};
use identity_harness_cli::commands::ca::{ca_handler, CaArgs};
use identity_harness_cli::commands::connections::{connections_handler, ConnectionsArgs};
use identity_harness_cli::commands::handler::ContextHandler;
use identity_harness_cli::commands::invitation::{invitation_handler, InvitationArgs};
use identity_harness_cli::commands::mediation::{mediation_handler, MediationArgs};
use identity_harness_cli::commands::schema::{schema_handler, SchemaArgs};
use identity_harness_cli::types::{CliError, HARNESS_DEFAULT_DIR};
use identity_harness_cli::utils::homedir::setup_homedir;

#[derive(Parser)]
#[command(name = "harness-cli")]
#[command(version = "0.1.0")]
#[command(long_about = None)]
struct Cli {
    /// agent profile name, overrides the stored session
    #[arg(long, global = true)]
    agent: Option<String>,

    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Agents(AgentArgs),
    Invitation(InvitationArgs),
    Connections(ConnectionsArgs),
    Schema(SchemaArgs),
    Ca(CaArgs),
    Mediation(MediationArgs),
}

fn init_logging(log_level: &str) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "identity_harness_cli={log_level},identity_harness_core={log_level},identity_harness_admin={log_level}"
        )))
        .with(tracing_subscriber::fmt::layer().without_time())
        .try_init();
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let harness_dir = setup_homedir(HARNESS_DEFAULT_DIR)?;
    let mut ctx = ContextHandler::new();
    ctx.build_config(cli.log_level.clone(), harness_dir)
        .set_agent(cli.agent.clone());

    match cli.commands {
        Commands::Agents(args) => agent_handler(&ctx, args.commands),
        Commands::Invitation(args) => invitation_handler(&ctx, args.commands).await,
        Commands::Connections(args) => connections_handler(&ctx, args.commands).await,
        Commands::Schema(args) => schema_handler(&ctx, args.commands).await,
        Commands::Ca(args) => ca_handler(args).await,
        Commands::Mediation(args) => mediation_handler(&ctx, args.commands).await,
    }
}

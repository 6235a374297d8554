use clap::{Parser, Subcommand};
use rst_common::standard::serde_json;
use rst_common::with_tokio::tokio;

use identity_harnessd::errors::HarnessError;
use identity_harnessd::svc::endorser::Endorser;
use identity_harnessd::svc::logging;
use identity_harnessd::svc::mediation::Mediation;
use identity_harnessd::svc::webhooks::Webhooks;

#[derive(Parser)]
#[command(name = "harnessd")]
#[command(version = "0.1")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "webhooks")]
    #[command(about = "Running the webhook receiver")]
    Webhooks {
        #[arg(short, long, value_name = "FILE")]
        config: String,
    },

    #[command(name = "mediate")]
    #[command(about = "Connecting the wallet agent to its mediator")]
    Mediate {
        #[arg(short, long, value_name = "FILE")]
        config: String,
    },

    #[command(name = "endorser")]
    #[command(about = "Running the endorser setup and its webhook receiver")]
    Endorser {
        #[arg(short, long, value_name = "FILE")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), HarnessError> {
    logging::init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Webhooks { config } => {
            Webhooks::new(config.to_owned()).run().await?;
        }
        Commands::Mediate { config } => {
            let grant = Mediation::new(config.to_owned()).run().await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&grant).unwrap_or_default()
            );
        }
        Commands::Endorser { config } => {
            Endorser::new(config.to_owned())
                .run(|info| {
                    println!("endorser public did: {}", info.public_did);
                    if let Some(url) = info.invitation.invitation_url() {
                        println!("invitation url: {url}");
                    }
                })
                .await?;
        }
    }

    Ok(())
}

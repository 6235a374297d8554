use cli_table::{print_stdout, WithTitle};

use rst_common::with_logging::log::{debug, info};

use crate::commands::handler::ContextHandler;
use crate::types::CliError;

use super::AgentCommands;

use super::types::*;
use super::utils::*;

pub fn handle_commands(ctx: &ContextHandler, commands: AgentCommands) -> Result<(), CliError> {
    debug!("agent command handler triggered...");

    match commands {
        AgentCommands::Add(args) => {
            debug!("[agent:add] name: {} | admin_url: {}", args.name, args.admin_url);

            let agent_config_path = build_agent_config_path(ctx)?;
            let agent_toml = match agent_config_path.exists() {
                true => {
                    let mut agent_toml = read_agent_config(agent_config_path.clone())?;
                    agent_toml.add(args.name, args.admin_url, args.api_key);
                    agent_toml
                }
                _ => AgentToml::new(args.name, args.admin_url, args.api_key),
            };

            save_agent_config(agent_config_path, agent_toml)?;
        }
        AgentCommands::List => {
            debug!("[agent:list] triggered...");

            let agent_config_path = build_agent_config_path(ctx)?;
            let agent_toml = read_agent_config(agent_config_path)?;
            let agent_table: Vec<AgentRow> = agent_toml
                .agents()
                .into_iter()
                .map(AgentRow::from)
                .collect();

            print_stdout(agent_table.with_title())
                .map_err(|err| CliError::AgentError(err.to_string()))?;
        }
        AgentCommands::Session(args) => {
            debug!("[agent:session] triggered...");

            let agent_config_path = build_agent_config_path(ctx)?;
            let agent = read_agent_config(agent_config_path)?
                .find(&args.name)
                .ok_or(CliError::AgentError(String::from("unknown agent name")))?;

            create_agent_session(ctx, agent.name())?;
            info!("[agent:session] Agent session already been set: {}", agent.name())
        }
    }

    Ok(())
}

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rst_common::with_logging::log::debug;

use identity_harness_admin::AdminClient;

use crate::commands::handler::ContextHandler;
use crate::types::CliError;

use super::types::*;

pub const CLI_ADMIN_TIMEOUT_SECS: u64 = 30;

/// `get_agent_client` builds the admin client of the agent selected by `--agent` or
/// by the stored session
pub fn get_agent_client(ctx: &ContextHandler) -> Result<AdminClient, CliError> {
    let agent_name = match ctx.agent() {
        Some(name) => name,
        None => read_agent_session(ctx)?,
    };

    let agent_config_path = build_agent_config_path(ctx)?;
    debug!(
        "[agent:get_agent_client] agent: {agent_name} | path: {}",
        agent_config_path.display()
    );

    let agent = read_agent_config(agent_config_path)?
        .find(agent_name.trim())
        .ok_or(CliError::AgentError(String::from("unknown agent name")))?;

    Ok(AdminClient::new(
        &agent.admin_url(),
        agent.api_key(),
        Duration::from_secs(CLI_ADMIN_TIMEOUT_SECS),
    ))
}

pub fn read_agent_session(ctx: &ContextHandler) -> Result<String, CliError> {
    let harness_dir = harness_dir(ctx)?;
    debug!("[agent:read_agent_session] harness_dir: {harness_dir}");

    let path_builder = format!("{}/{}", harness_dir, AGENT_SESSION);
    let agent_name = fs::read_to_string(path_builder.as_str())
        .map_err(|err| CliError::AgentError(format!("missing agent session: {err}")))?;

    Ok(agent_name)
}

pub(super) fn create_agent_session(ctx: &ContextHandler, name: String) -> Result<(), CliError> {
    let harness_dir = harness_dir(ctx)?;
    debug!("[agent:create_agent_session] harness_dir: {harness_dir}");

    let path_builder = format!("{}/{}", harness_dir, AGENT_SESSION);
    write_file(Path::new(path_builder.as_str()).to_path_buf(), name.as_bytes())
        .map_err(|err| CliError::AgentError(err.to_string()))
}

pub(super) fn build_agent_config_path(ctx: &ContextHandler) -> Result<PathBuf, CliError> {
    let harness_dir = harness_dir(ctx)?;
    debug!("[agent:build_agent_config_path] harness_dir: {harness_dir}");

    let path_builder = format!("{}/{}", harness_dir, AGENT_FILE);
    Ok(Path::new(path_builder.as_str()).to_path_buf())
}

pub(super) fn read_agent_config(agent_config_path: PathBuf) -> Result<AgentToml, CliError> {
    let contents = fs::read_to_string(agent_config_path)
        .map_err(|err| CliError::TomlError(err.to_string()))?;

    let agent_toml: AgentToml =
        toml::from_str(&contents).map_err(|err| CliError::TomlError(err.to_string()))?;
    Ok(agent_toml)
}

pub(super) fn save_agent_config(
    agent_config_path: PathBuf,
    confs: AgentToml,
) -> Result<(), CliError> {
    let agent_toml = toml::to_string(&confs).map_err(|err| CliError::TomlError(err.to_string()))?;
    write_file(agent_config_path, agent_toml.as_bytes())
        .map_err(|err| CliError::TomlError(err.to_string()))
}

fn harness_dir(ctx: &ContextHandler) -> Result<String, CliError> {
    Ok(ctx
        .config()
        .ok_or(CliError::HomeDirError(String::from("missing directory")))?
        .harness_dir())
}

fn write_file(path: PathBuf, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;

    file.write_all(contents)
}

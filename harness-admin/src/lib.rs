//! `identity-harness-admin` holds the adapters of `identity-harness-core`: the `reqwest`
//! admin API client, the `axum` webhook receiver and the TOML configuration.
pub mod common;

mod config;
pub use config::{Agent, Config, Ledger, Mediation, Parser as ConfigManager, Webhook};

mod client;
pub use client::AdminClient;

mod webhook;
pub use webhook::{parse_topic_path, WebhookServer};

use identity_harness_core::agent::webhook::Dispatcher;
use identity_harness_core::ca::{FabricCaClient, ProcessRunner};

use common::helpers;
use common::types::CommonError;

/// `Harness` loads and validates a configuration file and builds the adapters from it
pub struct Harness {
    config: Config,
}

impl Harness {
    pub fn new(conf_file: &str) -> Result<Self, CommonError> {
        let config = ConfigManager::new(conf_file.to_string())
            .parse()
            .map_err(|err| CommonError::ConfigError(err.to_string()))?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, CommonError> {
        helpers::validate(config.clone())?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn build_agent_client(&self) -> AdminClient {
        AdminClient::from_config(self.config.agent())
    }

    pub fn build_mediator_client(&self) -> Result<AdminClient, CommonError> {
        self.config
            .mediator()
            .map(AdminClient::from_config)
            .ok_or(CommonError::ConfigError(String::from(
                "missing [mediator] section",
            )))
    }

    pub fn build_endorser_client(&self) -> Result<AdminClient, CommonError> {
        self.config
            .endorser()
            .map(AdminClient::from_config)
            .ok_or(CommonError::ConfigError(String::from(
                "missing [endorser] section",
            )))
    }

    pub fn build_webhook_server(&self, dispatcher: Dispatcher) -> WebhookServer {
        WebhookServer::new(self.config.webhook(), dispatcher)
    }

    pub fn build_ca_client(&self) -> Result<FabricCaClient<ProcessRunner>, CommonError> {
        self.config
            .ca()
            .cloned()
            .map(|config| FabricCaClient::new(config, ProcessRunner))
            .ok_or(CommonError::ConfigError(String::from("missing [ca] section")))
    }
}

use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

pub const DEFAULT_WEBHOOK_PREFIX: &str = "";

/// `Webhook` is the listener the agent posts its `/topic/<topic>/` callbacks to
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Webhook {
    pub(super) host: String,
    pub(super) port: String,

    #[serde(default)]
    pub(super) prefix: String,
}

impl Webhook {
    pub fn new(host: &str, port: &str, prefix: &str) -> Self {
        Self {
            host: host.to_string(),
            port: port.to_string(),
            prefix: prefix.to_string(),
        }
    }

    pub fn get_webhook_config(&self) -> (String, String) {
        (self.host.to_owned(), self.port.to_owned())
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn prefix(&self) -> String {
        self.prefix.trim_end_matches('/').to_string()
    }
}

impl Default for Webhook {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: "8022".to_string(),
            prefix: DEFAULT_WEBHOOK_PREFIX.to_string(),
        }
    }
}

impl ToValidate for Webhook {
    fn validate(&self) -> Result<(), CommonError> {
        if self.host.is_empty() {
            return Err(CommonError::ValidationError(
                "config: webhook:host is missing".to_string(),
            ));
        }

        if self.port.parse::<u16>().is_err() {
            return Err(CommonError::ValidationError(format!(
                "config: webhook:port is invalid: {}",
                self.port
            )));
        }

        if !self.prefix.is_empty() && !self.prefix.starts_with('/') {
            return Err(CommonError::ValidationError(
                "config: webhook:prefix must start with /".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstdev_config::format::use_toml;
    use rstdev_config::parser::from_file;
    use rstdev_config::{types::ConfigError, Builder};

    use crate::common::helpers::{self, testconfig};

    #[test]
    fn test_parse_webhook_config() -> Result<(), ConfigError> {
        let toml_file = testconfig::fixture("config_webhook.toml");
        let config_toml = {
            let config_builder: Result<Webhook, ConfigError> =
                Builder::new(from_file(toml_file)).fetch()?.parse(use_toml);

            config_builder
        };

        assert!(!config_toml.is_err());

        let config_webhook = config_toml.unwrap();
        assert_eq!(config_webhook.host, "localhost".to_string());
        assert_eq!(config_webhook.port, "8022".to_string());
        assert_eq!(config_webhook.prefix(), "/webhooks");
        Ok(())
    }

    #[test]
    fn test_webhook_validation_failed() {
        let mut webhook = Webhook::default();
        webhook.port = "not-a-port".to_string();

        let validation = helpers::validate(webhook.clone());
        assert!(validation.is_err());
        assert!(validation
            .unwrap_err()
            .to_string()
            .contains("webhook:port"));

        webhook.port = "8022".to_string();
        webhook.prefix = "webhooks".to_string();
        let validation = helpers::validate(webhook);
        assert!(validation
            .unwrap_err()
            .to_string()
            .contains("webhook:prefix"));
    }
}

use std::time::Duration;

use rst_common::standard::serde::{self, Deserialize};

use identity_harness_core::agent::mediation::types::{
    PollConfig, DEFAULT_POLL_ATTEMPTS, DEFAULT_POLL_DELAY,
};
use identity_harness_core::agent::schema::types::DEFAULT_TAILS_FILE_COUNT;

use crate::common::types::{CommonError, ToValidate};

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Mediation {
    pub(super) attempts: u32,
    pub(super) delay_ms: u64,
}

impl Mediation {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig::new(self.attempts, Duration::from_millis(self.delay_ms))
    }
}

impl Default for Mediation {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_POLL_ATTEMPTS,
            delay_ms: DEFAULT_POLL_DELAY.as_millis() as u64,
        }
    }
}

impl ToValidate for Mediation {
    fn validate(&self) -> Result<(), CommonError> {
        if self.attempts == 0 {
            return Err(CommonError::ValidationError(
                "config: mediation:attempts must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Ledger {
    pub(super) tails_file_count: u32,
}

impl Ledger {
    pub fn tails_file_count(&self) -> u32 {
        self.tails_file_count
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            tails_file_count: DEFAULT_TAILS_FILE_COUNT,
        }
    }
}

impl ToValidate for Ledger {
    fn validate(&self) -> Result<(), CommonError> {
        if self.tails_file_count == 0 {
            return Err(CommonError::ValidationError(
                "config: ledger:tails_file_count must be positive".to_string(),
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
    fn test_parse_mediation_config() -> Result<(), ConfigError> {
        let toml_file = testconfig::fixture("config_mediation.toml");
        let config_toml = {
            let config_builder: Result<Mediation, ConfigError> =
                Builder::new(from_file(toml_file)).fetch()?.parse(use_toml);

            config_builder
        };

        let poll = config_toml.unwrap().poll_config();
        assert_eq!(poll.attempts, 5);
        assert_eq!(poll.delay, Duration::from_millis(250));
        Ok(())
    }

    #[test]
    fn test_default_poll_config() {
        let mediation = Mediation::default();
        assert_eq!(mediation.poll_config(), PollConfig::default());
    }

    #[test]
    fn test_validation_failed() {
        let mediation = Mediation {
            attempts: 0,
            delay_ms: 10,
        };
        assert!(helpers::validate(mediation)
            .unwrap_err()
            .to_string()
            .contains("mediation:attempts"));

        let ledger = Ledger {
            tails_file_count: 0,
        };
        assert!(matches!(
            helpers::validate(ledger),
            Err(CommonError::ValidationError(_))
        ));
    }
}

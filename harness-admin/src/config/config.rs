use rst_common::standard::serde::{self, Deserialize};

use identity_harness_core::ca::types::CaClientConfig;

use crate::common::types::{CommonError, ToValidate};

use super::{Agent, Ledger, Mediation, Webhook};

#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Config {
    pub(super) webhook: Webhook,
    pub(super) agent: Agent,

    #[serde(default)]
    pub(super) mediator: Option<Agent>,

    #[serde(default)]
    pub(super) endorser: Option<Agent>,

    #[serde(default)]
    pub(super) mediation: Mediation,

    #[serde(default)]
    pub(super) ledger: Ledger,

    #[serde(default)]
    pub(super) ca: Option<CaClientConfig>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn webhook(&self) -> &Webhook {
        &self.webhook
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn mediator(&self) -> Option<&Agent> {
        self.mediator.as_ref()
    }

    pub fn endorser(&self) -> Option<&Agent> {
        self.endorser.as_ref()
    }

    pub fn mediation(&self) -> &Mediation {
        &self.mediation
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ca(&self) -> Option<&CaClientConfig> {
        self.ca.as_ref()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook: Webhook::default(),
            agent: Agent::default(),
            mediator: None,
            endorser: None,
            mediation: Mediation::default(),
            ledger: Ledger::default(),
            ca: None,
        }
    }
}

impl ToValidate for Config {
    fn validate(&self) -> Result<(), CommonError> {
        _ = self.webhook.validate()?;
        _ = self.agent.validate()?;
        _ = self.mediation.validate()?;
        _ = self.ledger.validate()?;

        if let Some(mediator) = &self.mediator {
            _ = mediator.validate()?;
        }

        if let Some(endorser) = &self.endorser {
            _ = endorser.validate()?;
        }

        Ok(())
    }
}

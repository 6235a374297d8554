use identity_harness_admin::Harness;
use identity_harness_core::agent::relationship::types::RelationshipKind;
use identity_harness_core::agent::relationship::Relationships;
use identity_harness_core::agent::webhook::Dispatcher;

use crate::errors::HarnessError;

use super::receiver;

pub struct Webhooks {
    config: String,
}

impl Webhooks {
    pub fn new(config: String) -> Self {
        Self { config }
    }

    /// `run` serves the receiver until it stops, events are routed and logged
    pub async fn run(&self) -> Result<(), HarnessError> {
        let harness =
            Harness::new(&self.config).map_err(|err| HarnessError::ConfigError(err.to_string()))?;

        let relationships = Relationships::new(&[RelationshipKind::Own]);
        let handle = receiver::spawn(&harness, Dispatcher::standard(relationships, vec![])).await?;

        handle
            .await
            .map_err(|err| HarnessError::WebhookError(err.to_string()))
    }
}

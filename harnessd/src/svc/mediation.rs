use rst_common::standard::serde_json;
use rst_common::with_logging::log::info;

use identity_harness_admin::Harness;
use identity_harness_core::agent::connection::Initiator;
use identity_harness_core::agent::mediation::types::{MediationGrant, TokioDelay};
use identity_harness_core::agent::mediation::{GrantPoller, MediationSetup};
use identity_harness_core::agent::relationship::types::RelationshipKind;
use identity_harness_core::agent::relationship::Relationships;
use identity_harness_core::agent::webhook::Dispatcher;

use crate::errors::HarnessError;

use super::receiver;

/// `Mediation` connects the `[agent]` wallet to the `[mediator]` agent
///
/// The mediator must post its webhooks to the `[webhook]` listener
pub struct Mediation {
    config: String,
}

impl Mediation {
    pub fn new(config: String) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<MediationGrant, HarnessError> {
        let harness =
            Harness::new(&self.config).map_err(|err| HarnessError::ConfigError(err.to_string()))?;

        let mediator = harness
            .build_mediator_client()
            .map_err(|err| HarnessError::ConfigError(err.to_string()))?;
        let wallet = harness.build_agent_client();

        let relationships = Relationships::new(&[RelationshipKind::Mediator]);
        let receiver =
            receiver::spawn(&harness, Dispatcher::standard(relationships.clone(), vec![])).await?;

        let poller = GrantPoller::new(
            wallet.clone(),
            TokioDelay,
            harness.config().mediation().poll_config(),
        );

        let setup = MediationSetup::new(Initiator::new(mediator, relationships), wallet, poller);
        let grant = setup.run().await;
        receiver.abort();

        let grant = grant.map_err(|err| HarnessError::MediationError(err.to_string()))?;
        info!(
            "[harnessd:mediation] granted: {}",
            serde_json::to_string(&grant).unwrap_or_default()
        );

        Ok(grant)
    }
}

use std::sync::Arc;

use rst_common::with_logging::log::{info, warn};

use identity_harness_admin::Harness;
use identity_harness_core::agent::connection::Initiator;
use identity_harness_core::agent::endorser::types::EndorserInfo;
use identity_harness_core::agent::endorser::{EndorserRoleHook, EndorserSetup};
use identity_harness_core::agent::relationship::types::RelationshipKind;
use identity_harness_core::agent::relationship::Relationships;
use identity_harness_core::agent::webhook::types::ActivationHook;
use identity_harness_core::agent::webhook::Dispatcher;

use crate::errors::HarnessError;

use super::receiver;

/// `Endorser` publishes the multi-use invitation of the `[endorser]` agent and keeps
/// serving its webhooks
///
/// Every author connection that becomes active on the invitation gets the endorser role
pub struct Endorser {
    config: String,
}

impl Endorser {
    pub fn new(config: String) -> Self {
        Self { config }
    }

    pub async fn run<F>(&self, on_ready: F) -> Result<(), HarnessError>
    where
        F: FnOnce(&EndorserInfo),
    {
        let harness =
            Harness::new(&self.config).map_err(|err| HarnessError::ConfigError(err.to_string()))?;

        let endorser = harness
            .build_endorser_client()
            .map_err(|err| HarnessError::ConfigError(err.to_string()))?;
        let did_exchange = harness
            .config()
            .endorser()
            .map(|agent| agent.did_exchange())
            .unwrap_or(false);

        let relationships = Relationships::new(&[RelationshipKind::Endorser]);
        let role_hook: Arc<dyn ActivationHook> = Arc::new(EndorserRoleHook::new(endorser.clone()));
        let dispatcher = Dispatcher::standard(
            relationships.clone(),
            vec![(RelationshipKind::Endorser, role_hook)],
        );
        let receiver = receiver::spawn(&harness, dispatcher).await?;

        let initiator = Initiator::new(endorser, relationships);
        let setup = EndorserSetup::new(initiator.clone(), did_exchange);
        let info = setup
            .run()
            .await
            .map_err(|err| HarnessError::EndorserError(err.to_string()))?;
        on_ready(&info);

        let ready = initiator
            .await_ready(RelationshipKind::Endorser)
            .await
            .map_err(|err| HarnessError::EndorserError(err.to_string()))?;

        if ready {
            info!("[harnessd:endorser] first author connected");
        } else {
            warn!("[harnessd:endorser] author connection failed");
        }

        receiver
            .await
            .map_err(|err| HarnessError::WebhookError(err.to_string()))
    }
}

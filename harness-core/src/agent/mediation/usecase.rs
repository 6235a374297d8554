use rst_common::standard::serde_json::json;
use rst_common::with_logging::log::{debug, info};

use crate::agent::admin::response::required_str;
use crate::agent::admin::types::{AdminAPI, AdminRequest};
use crate::agent::connection::types::{ConnectionError, CreateInvitation, InvitationMode};
use crate::agent::connection::Initiator;
use crate::agent::relationship::types::{ConnectionID, RelationshipKind};

use super::poller::GrantPoller;
use super::types::{Delay, MediationError, MediationGrant, MediationRequestID};

/// `MediationSetup` connects a wallet agent to a mediator and waits for the grant
///
/// The mediator side is driven through its [`Initiator`], its webhook receiver must
/// share the same relationships so the mediator connection can be resolved. The
/// wallet side only needs the admin API.
pub struct MediationSetup<TMediator, TWallet, TDelay>
where
    TMediator: AdminAPI,
    TWallet: AdminAPI,
    TDelay: Delay,
{
    mediator: Initiator<TMediator>,
    wallet: TWallet,
    poller: GrantPoller<TWallet, TDelay>,
}

impl<TMediator, TWallet, TDelay> MediationSetup<TMediator, TWallet, TDelay>
where
    TMediator: AdminAPI,
    TWallet: AdminAPI,
    TDelay: Delay,
{
    pub fn new(
        mediator: Initiator<TMediator>,
        wallet: TWallet,
        poller: GrantPoller<TWallet, TDelay>,
    ) -> Self {
        Self {
            mediator,
            wallet,
            poller,
        }
    }

    pub async fn run(&self) -> Result<MediationGrant, MediationError> {
        let record = self
            .mediator
            .initiate(
                RelationshipKind::Mediator,
                InvitationMode::Create(CreateInvitation::legacy()),
            )
            .await?;

        let invitation = record
            .invitation()
            .cloned()
            .ok_or(ConnectionError::InvalidInvitation(String::from(
                "mediator returned no invitation",
            )))?;

        let received = self
            .wallet
            .send(AdminRequest::post("/connections/receive-invitation").with_body(invitation))
            .await?;

        let wallet_connection_id =
            required_str(&received, "connection_id").map(ConnectionID::from)?;
        debug!("[mediation:setup] wallet connection: {wallet_connection_id}");

        let ready = self.mediator.await_ready(RelationshipKind::Mediator).await?;
        if !ready {
            return Err(MediationError::ConnectionFailed);
        }

        let request_id = self.request_mediation(&wallet_connection_id).await?;
        let state = self.poller.poll(&request_id).await?;

        info!("[mediation:setup] mediation {request_id} {state}");
        Ok(MediationGrant {
            request_id,
            wallet_connection_id,
            mediator_connection_id: record.connection_id().cloned(),
            state,
        })
    }

    async fn request_mediation(
        &self,
        connection_id: &ConnectionID,
    ) -> Result<MediationRequestID, MediationError> {
        let response = self
            .wallet
            .send(
                AdminRequest::post(format!("/mediation/request/{}", connection_id))
                    .with_body(json!({})),
            )
            .await?;

        let request_id = required_str(&response, "mediation_id").map(MediationRequestID::from)?;
        Ok(request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use mockall::mock;

    use rst_common::standard::async_trait::async_trait;
    use rst_common::standard::serde_json::Value;
    use rst_common::with_tokio::tokio;

    use crate::agent::admin::types::AdminError;
    use crate::agent::mediation::types::PollConfig;
    use crate::agent::relationship::Relationships;

    mock!(
        FakeAdmin{}

        impl Clone for FakeAdmin {
            fn clone(&self) -> Self;
        }

        #[async_trait]
        impl AdminAPI for FakeAdmin {
            async fn send(&self, request: AdminRequest) -> Result<Value, AdminError>;
        }
    );

    mock!(
        FakeDelay{}

        impl Clone for FakeDelay {
            fn clone(&self) -> Self;
        }

        #[async_trait]
        impl Delay for FakeDelay {
            async fn sleep(&self, duration: Duration);
        }
    );

    fn mediator_admin() -> MockFakeAdmin {
        let mut admin = MockFakeAdmin::new();
        admin
            .expect_send()
            .withf(|request| request.path() == "/connections/create-invitation")
            .times(1)
            .returning(|_| {
                Ok(json!({
                    "connection_id": "m1",
                    "invitation": {"label": "mediator"},
                    "invitation_url": "http://mediator/?c_i=abc"
                }))
            });
        admin
    }

    fn wallet_admin(relationships: Relationships, connected: bool) -> MockFakeAdmin {
        let mut admin = MockFakeAdmin::new();
        admin
            .expect_send()
            .withf(|request| request.path() == "/connections/receive-invitation")
            .times(1)
            .returning(move |request| {
                assert_eq!(request.body(), Some(&json!({"label": "mediator"})));
                // the mediator webhook arrives before anybody awaits
                relationships
                    .resolve(RelationshipKind::Mediator, connected)
                    .unwrap();
                Ok(json!({"connection_id": "w1"}))
            });
        admin
            .expect_send()
            .withf(|request| request.path() == "/mediation/request/w1")
            .returning(|_| Ok(json!({"mediation_id": "r1", "state": "request"})));
        admin
    }

    fn generate_setup(
        connected: bool,
    ) -> MediationSetup<MockFakeAdmin, MockFakeAdmin, MockFakeDelay> {
        let relationships = Relationships::new(&[RelationshipKind::Mediator]);
        let mediator = Initiator::new(mediator_admin(), relationships.clone());

        let mut delay = MockFakeDelay::new();
        delay.expect_sleep().returning(|_| ());

        let mut poller_admin = MockFakeAdmin::new();
        poller_admin
            .expect_send()
            .withf(|request| request.path() == "/mediation/requests/r1")
            .returning(|_| Ok(json!({"state": "granted"})));

        let poller = GrantPoller::new(
            poller_admin,
            delay,
            PollConfig::new(3, Duration::from_millis(1)),
        );

        MediationSetup::new(mediator, wallet_admin(relationships, connected), poller)
    }

    #[tokio::test]
    async fn test_mediation_granted() {
        let setup = generate_setup(true);
        let grant = setup.run().await.unwrap();

        assert_eq!(grant.request_id, MediationRequestID::from("r1"));
        assert_eq!(grant.wallet_connection_id, ConnectionID::from("w1"));
        assert_eq!(grant.mediator_connection_id, Some(ConnectionID::from("m1")));
        assert_eq!(grant.state, "granted");
    }

    #[tokio::test]
    async fn test_mediator_connection_failed() {
        let setup = generate_setup(false);
        let result = setup.run().await;
        assert_eq!(result, Err(MediationError::ConnectionFailed));
    }
}

use rst_common::standard::async_trait::async_trait;
use rst_common::with_logging::log::info;

use crate::agent::admin::response::required_str;
use crate::agent::admin::types::{AdminAPI, AdminRequest};
use crate::agent::connection::types::{CreateInvitation, HandshakeProtocol, InvitationMode};
use crate::agent::connection::Initiator;
use crate::agent::relationship::types::{ConnectionID, RelationshipKind};
use crate::agent::webhook::types::{ActivationHook, WebhookError};

use super::types::{EndorserError, EndorserInfo, ENDORSER_ALIAS, TRANSACTION_ENDORSER};

/// `EndorserSetup` publishes the endorser's multi-use invitation
///
/// Authors answer the same invitation, the first request adopts the relationship's
/// connection id and its activation settles the endorser signal
#[derive(Clone)]
pub struct EndorserSetup<TAdmin>
where
    TAdmin: AdminAPI,
{
    initiator: Initiator<TAdmin>,
    did_exchange: bool,
}

impl<TAdmin> EndorserSetup<TAdmin>
where
    TAdmin: AdminAPI,
{
    pub fn new(initiator: Initiator<TAdmin>, did_exchange: bool) -> Self {
        Self {
            initiator,
            did_exchange,
        }
    }

    pub fn invitation_options(&self) -> CreateInvitation {
        let opts = if self.did_exchange {
            CreateInvitation::out_of_band(HandshakeProtocol::DidExchange)
        } else {
            CreateInvitation::legacy()
        };

        opts.with_alias(ENDORSER_ALIAS).with_multi_use(true)
    }

    pub async fn run(&self) -> Result<EndorserInfo, EndorserError> {
        let invitation = self
            .initiator
            .initiate(
                RelationshipKind::Endorser,
                InvitationMode::Create(self.invitation_options()),
            )
            .await?;

        let response = self
            .initiator
            .admin()
            .send(AdminRequest::get("/wallet/did/public"))
            .await?;
        let public_did = required_str(&response, "result.did")?;

        info!("[endorser:setup] endorser public did: {public_did}");
        Ok(EndorserInfo {
            invitation,
            public_did,
        })
    }
}

/// `EndorserRoleHook` assigns the endorser job on a freshly active connection
#[derive(Clone)]
pub struct EndorserRoleHook<TAdmin>
where
    TAdmin: AdminAPI,
{
    admin: TAdmin,
}

impl<TAdmin> EndorserRoleHook<TAdmin>
where
    TAdmin: AdminAPI,
{
    pub fn new(admin: TAdmin) -> Self {
        Self { admin }
    }
}

#[async_trait]
impl<TAdmin> ActivationHook for EndorserRoleHook<TAdmin>
where
    TAdmin: AdminAPI,
{
    async fn on_active(&self, connection_id: &ConnectionID) -> Result<(), WebhookError> {
        let request = AdminRequest::post(format!(
            "/transactions/{}/set-endorser-role",
            connection_id
        ))
        .with_param("transaction_my_job", TRANSACTION_ENDORSER);

        self.admin
            .send(request)
            .await
            .map_err(|err| WebhookError::HookError(err.to_string()))?;

        info!("[endorser:role] {connection_id} set as {TRANSACTION_ENDORSER}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;

    use rst_common::standard::serde_json::{json, Value};
    use rst_common::with_tokio::tokio;

    use crate::agent::admin::types::AdminError;
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

    fn generate_setup(admin: MockFakeAdmin, did_exchange: bool) -> EndorserSetup<MockFakeAdmin> {
        let relationships = Relationships::new(&[RelationshipKind::Endorser]);
        EndorserSetup::new(Initiator::new(admin, relationships), did_exchange)
    }

    #[tokio::test]
    async fn test_run_legacy_invitation() {
        let mut admin = MockFakeAdmin::new();
        admin
            .expect_send()
            .withf(|request| {
                request.path() == "/connections/create-invitation"
                    && request.param("alias") == Some(ENDORSER_ALIAS)
                    && request.param("multi_use") == Some("true")
                    && request.param("auto_accept") == Some("true")
            })
            .times(1)
            .returning(|_| Ok(json!({"connection_id": "e0", "invitation": {}})));
        admin
            .expect_send()
            .withf(|request| request.path() == "/wallet/did/public")
            .times(1)
            .returning(|_| Ok(json!({"result": {"did": "did:sov:endorser", "verkey": "v"}})));

        let setup = generate_setup(admin, false);
        let info = setup.run().await.unwrap();

        assert_eq!(info.public_did, "did:sov:endorser");
        assert_eq!(
            info.invitation.connection_id(),
            Some(&ConnectionID::from("e0"))
        );

        let relationship = setup
            .initiator
            .relationships()
            .get(RelationshipKind::Endorser)
            .unwrap();
        assert!(relationship.is_multi_use());
        assert!(relationship.is_pending());
    }

    #[tokio::test]
    async fn test_run_did_exchange_invitation() {
        let mut admin = MockFakeAdmin::new();
        admin
            .expect_send()
            .withf(|request| request.path() == "/out-of-band/create-invitation")
            .times(1)
            .returning(|_| Ok(json!({"invi_msg_id": "invi-1", "invitation": {}})));
        admin
            .expect_send()
            .withf(|request| request.path() == "/wallet/did/public")
            .returning(|_| Ok(json!({"result": null})));

        let setup = generate_setup(admin, true);
        let result = setup.run().await;
        assert_eq!(
            result,
            Err(EndorserError::AdminError(AdminError::MissingField(
                "result.did".to_string()
            )))
        );
    }

    #[tokio::test]
    async fn test_role_hook_request() {
        let mut admin = MockFakeAdmin::new();
        admin
            .expect_send()
            .withf(|request| {
                request.path() == "/transactions/author-1/set-endorser-role"
                    && request.param("transaction_my_job") == Some(TRANSACTION_ENDORSER)
            })
            .times(1)
            .returning(|_| Ok(json!({})));

        let hook = EndorserRoleHook::new(admin);
        let result = hook.on_active(&ConnectionID::from("author-1")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_role_hook_failure_mapped() {
        let mut admin = MockFakeAdmin::new();
        admin.expect_send().returning(|_| {
            Err(AdminError::StatusError {
                status: 404,
                message: "not found".to_string(),
            })
        });

        let hook = EndorserRoleHook::new(admin);
        let result = hook.on_active(&ConnectionID::from("author-1")).await;
        assert!(matches!(result, Err(WebhookError::HookError(_))));
    }
}

use rst_common::standard::serde_json::json;
use rst_common::with_logging::log::{debug, info};

use crate::agent::admin::types::{AdminAPI, AdminRequest};
use crate::agent::relationship::types::RelationshipKind;
use crate::agent::relationship::Relationships;

use super::types::{
    ConnectionError, CreateInvitation, InvitationMode, InvitationRecord, ReceiveInvitation,
};

/// `Initiator` starts connection attempts for the relationships of one controller
///
/// [`Initiator::initiate`] never blocks on the peer. It arms the relationship, sends the
/// admin request and hands the invitation record back, so the caller can display it
/// before calling [`Initiator::await_ready`].
#[derive(Clone)]
pub struct Initiator<TAdmin>
where
    TAdmin: AdminAPI,
{
    admin: TAdmin,
    relationships: Relationships,
}

impl<TAdmin> Initiator<TAdmin>
where
    TAdmin: AdminAPI,
{
    pub fn new(admin: TAdmin, relationships: Relationships) -> Self {
        Self {
            admin,
            relationships,
        }
    }

    pub fn admin(&self) -> &TAdmin {
        &self.admin
    }

    pub fn relationships(&self) -> &Relationships {
        &self.relationships
    }

    /// `initiate` arms `kind` and issues the create or receive invitation request
    ///
    /// When the admin request fails the signal stays armed and unresolved, the error is
    /// returned as is and the caller decides whether the setup is over
    pub async fn initiate(
        &self,
        kind: RelationshipKind,
        mode: InvitationMode,
    ) -> Result<InvitationRecord, ConnectionError> {
        let _ = self.relationships.arm(kind)?;

        let multi_use = match &mode {
            InvitationMode::Create(opts) => opts.multi_use,
            InvitationMode::Receive(_) => false,
        };

        let request = build_request(&mode);
        debug!(
            "[connection:initiate] {kind}: {} {}",
            request.method(),
            request.path()
        );

        let response = self.admin.send(request).await?;
        let record = InvitationRecord::from_response(response);

        if let Some(connection_id) = record.connection_id() {
            self.relationships
                .record_connection(kind, connection_id.clone())?;
        }

        if let Some(invitation_msg_id) = record.invitation_msg_id() {
            self.relationships
                .record_invitation(kind, invitation_msg_id.to_string())?;
        }

        if multi_use {
            self.relationships.mark_multi_use(kind, true)?;
        }

        info!(
            "[connection:initiate] {kind} invitation ready, connection id: {}",
            record
                .connection_id()
                .map(|id| id.to_string())
                .unwrap_or(String::from("pending"))
        );

        Ok(record)
    }

    /// `await_ready` suspends until the webhook path settles the armed signal
    ///
    /// There is no timeout here, bounding the wait is the caller's decision
    pub async fn await_ready(&self, kind: RelationshipKind) -> Result<bool, ConnectionError> {
        let ready = self.relationships.await_ready(kind).await?;
        Ok(ready)
    }

    pub fn is_ready(&self, kind: RelationshipKind) -> bool {
        self.relationships.is_ready(kind)
    }
}

/// `build_request` maps an invitation mode to the admin endpoint that serves it
pub fn build_request(mode: &InvitationMode) -> AdminRequest {
    match mode {
        InvitationMode::Create(opts) => build_create_request(opts),
        InvitationMode::Receive(opts) => build_receive_request(opts),
    }
}

fn build_create_request(opts: &CreateInvitation) -> AdminRequest {
    let request = match opts.handshake {
        Some(handshake) => AdminRequest::post("/out-of-band/create-invitation").with_body(json!({
            "handshake_protocols": [handshake.as_str()],
            "use_public_did": opts.reuse_connections,
        })),
        None => AdminRequest::post("/connections/create-invitation"),
    };

    let request = match &opts.alias {
        Some(alias) => request.with_param("alias", alias),
        None => request,
    };

    request
        .with_param("auto_accept", opts.auto_accept)
        .with_param("multi_use", opts.multi_use)
}

fn build_receive_request(opts: &ReceiveInvitation) -> AdminRequest {
    if opts.is_out_of_band() {
        return AdminRequest::post("/out-of-band/receive-invitation")
            .with_body(opts.invitation.clone())
            .with_param("use_existing_connection", opts.reuse_connections);
    }

    AdminRequest::post("/connections/receive-invitation").with_body(opts.invitation.clone())
}

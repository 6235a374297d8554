use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::with_errors::thiserror::{self, Error};

use crate::agent::admin::response::field_str;
use crate::agent::admin::types::AdminError;
use crate::agent::relationship::types::{ConnectionID, SignalError};

pub const OOB_TYPE_MARKER: &str = "/out-of-band/";

#[derive(Debug, PartialEq, Error, Clone)]
pub enum ConnectionError {
    #[error("admin error: {0}")]
    AdminError(#[from] AdminError),

    #[error("signal error: {0}")]
    SignalError(#[from] SignalError),

    #[error("invalid invitation: {0}")]
    InvalidInvitation(String),
}

/// `HandshakeProtocol` selects the handshake used by out-of-band invitations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub enum HandshakeProtocol {
    /// RFC 0023, DID exchange
    DidExchange,
    /// RFC 0160, connections
    Connections,
}

impl HandshakeProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandshakeProtocol::DidExchange => "rfc23",
            HandshakeProtocol::Connections => "rfc160",
        }
    }
}

/// `CreateInvitation` carries the options of a new invitation
///
/// Without a handshake protocol the legacy `/connections/create-invitation` endpoint is
/// used, otherwise an out-of-band invitation is created
#[derive(Debug, Clone, PartialEq)]
pub struct CreateInvitation {
    pub handshake: Option<HandshakeProtocol>,
    pub reuse_connections: bool,
    pub auto_accept: bool,
    pub multi_use: bool,
    pub alias: Option<String>,
}

impl CreateInvitation {
    pub fn legacy() -> Self {
        Self {
            handshake: None,
            reuse_connections: false,
            auto_accept: true,
            multi_use: false,
            alias: None,
        }
    }

    pub fn out_of_band(handshake: HandshakeProtocol) -> Self {
        Self {
            handshake: Some(handshake),
            ..Self::legacy()
        }
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    pub fn with_multi_use(mut self, multi_use: bool) -> Self {
        self.multi_use = multi_use;
        self
    }

    pub fn with_reuse_connections(mut self, reuse: bool) -> Self {
        self.reuse_connections = reuse;
        self
    }
}

/// `ReceiveInvitation` carries an invitation produced by another agent
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiveInvitation {
    pub invitation: Value,
    pub reuse_connections: bool,
}

impl ReceiveInvitation {
    pub fn new(invitation: Value) -> Self {
        Self {
            invitation,
            reuse_connections: false,
        }
    }

    pub fn with_reuse_connections(mut self, reuse: bool) -> Self {
        self.reuse_connections = reuse;
        self
    }

    pub fn is_out_of_band(&self) -> bool {
        field_str(&self.invitation, "@type")
            .map(|kind| kind.contains(OOB_TYPE_MARKER))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InvitationMode {
    Create(CreateInvitation),
    Receive(ReceiveInvitation),
}

/// `InvitationRecord` is what an initiator hands back right after the admin request
///
/// It stays opaque to this crate beyond the identifiers needed to match webhook events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct InvitationRecord {
    invitation: Option<Value>,
    invitation_url: Option<String>,
    connection_id: Option<ConnectionID>,
    invitation_msg_id: Option<String>,
    raw: Value,
}

impl InvitationRecord {
    pub fn from_response(response: Value) -> Self {
        let invitation = response.get("invitation").cloned();
        let invitation_url = field_str(&response, "invitation_url");
        let connection_id = field_str(&response, "connection_id").map(ConnectionID::from);
        let invitation_msg_id = field_str(&response, "invi_msg_id")
            .or_else(|| field_str(&response, "invitation_msg_id"));

        Self {
            invitation,
            invitation_url,
            connection_id,
            invitation_msg_id,
            raw: response,
        }
    }

    pub fn invitation(&self) -> Option<&Value> {
        self.invitation.as_ref()
    }

    pub fn invitation_url(&self) -> Option<&str> {
        self.invitation_url.as_deref()
    }

    pub fn connection_id(&self) -> Option<&ConnectionID> {
        self.connection_id.as_ref()
    }

    pub fn invitation_msg_id(&self) -> Option<&str> {
        self.invitation_msg_id.as_deref()
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

use std::fmt;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::{self, Value};
use rst_common::with_errors::thiserror::{self, Error};

use crate::agent::relationship::types::{ConnectionID, RelationshipKind, SignalError};

pub const STATE_INVITATION: &str = "invitation";
pub const STATE_REQUEST: &str = "request";
pub const RFC23_STATE_REQUEST_RECEIVED: &str = "request-received";
pub const RFC23_STATE_COMPLETED: &str = "completed";

/// labels marking a finished handshake
pub const TERMINAL_SUCCESS_STATES: [&str; 3] = ["active", "completed", "connected"];

/// labels marking a handshake that will never finish
pub const TERMINAL_FAILURE_STATES: [&str; 2] = ["abandoned", "error"];

#[derive(Debug, PartialEq, Error, Clone)]
pub enum WebhookError {
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("hook error: {0}")]
    HookError(String),

    #[error("signal error: {0}")]
    SignalError(#[from] SignalError),
}

/// `Topic` lists the webhook topics this controller knows how to route
///
/// Anything else is dropped by the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Connections,
    ConnectionReuse,
    ConnectionReuseAccepted,
    OutOfBand,
    OobInvitation,
    Mediation,
    BasicMessages,
    IssueCredential,
    IssueCredentialV20,
    IssueCredentialV20Indy,
    IssueCredentialV20LdProof,
    IssuerCredRev,
    PresentProof,
    PresentProofV20,
    EndorseTransaction,
    RevocationNotification,
}

impl Topic {
    pub const ALL: [Topic; 16] = [
        Topic::Connections,
        Topic::ConnectionReuse,
        Topic::ConnectionReuseAccepted,
        Topic::OutOfBand,
        Topic::OobInvitation,
        Topic::Mediation,
        Topic::BasicMessages,
        Topic::IssueCredential,
        Topic::IssueCredentialV20,
        Topic::IssueCredentialV20Indy,
        Topic::IssueCredentialV20LdProof,
        Topic::IssuerCredRev,
        Topic::PresentProof,
        Topic::PresentProofV20,
        Topic::EndorseTransaction,
        Topic::RevocationNotification,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Connections => "connections",
            Topic::ConnectionReuse => "connection_reuse",
            Topic::ConnectionReuseAccepted => "connection_reuse_accepted",
            Topic::OutOfBand => "out_of_band",
            Topic::OobInvitation => "oob_invitation",
            Topic::Mediation => "mediation",
            Topic::BasicMessages => "basicmessages",
            Topic::IssueCredential => "issue_credential",
            Topic::IssueCredentialV20 => "issue_credential_v2_0",
            Topic::IssueCredentialV20Indy => "issue_credential_v2_0_indy",
            Topic::IssueCredentialV20LdProof => "issue_credential_v2_0_ld_proof",
            Topic::IssuerCredRev => "issuer_cred_rev",
            Topic::PresentProof => "present_proof",
            Topic::PresentProofV20 => "present_proof_v2_0",
            Topic::EndorseTransaction => "endorse_transaction",
            Topic::RevocationNotification => "revocation-notification",
        }
    }

    /// `parse` accepts the topic names used by the agent, `-` and `_` are interchangeable
    pub fn parse(name: &str) -> Option<Topic> {
        let normalized = name.trim().to_lowercase().replace('-', "_");
        Topic::ALL
            .into_iter()
            .find(|topic| topic.as_str().replace('-', "_") == normalized)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `WebhookEvent` is one inbound notification as delivered by the agent
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    topic: String,
    payload: Value,
}

impl WebhookEvent {
    pub fn new(topic: impl Into<String>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

/// `ConnectionEvent` is the payload of the `connections` topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct ConnectionEvent {
    pub connection_id: ConnectionID,
    pub state: String,

    #[serde(default)]
    pub rfc23_state: Option<String>,

    #[serde(default)]
    pub invitation_msg_id: Option<String>,

    #[serde(default)]
    pub alias: Option<String>,
}

impl ConnectionEvent {
    pub fn from_payload(payload: &Value) -> Result<Self, WebhookError> {
        serde_json::from_value(payload.clone())
            .map_err(|err| WebhookError::MalformedPayload(err.to_string()))
    }

    pub fn is_terminal_success(&self) -> bool {
        TERMINAL_SUCCESS_STATES.contains(&self.state.as_str())
            || self.rfc23_state.as_deref() == Some(RFC23_STATE_COMPLETED)
    }

    pub fn is_terminal_failure(&self) -> bool {
        TERMINAL_FAILURE_STATES.contains(&self.state.as_str())
            || self
                .rfc23_state
                .as_deref()
                .map(|state| TERMINAL_FAILURE_STATES.contains(&state))
                .unwrap_or(false)
    }

    pub fn is_request(&self) -> bool {
        self.state == STATE_REQUEST
            || self.rfc23_state.as_deref() == Some(RFC23_STATE_REQUEST_RECEIVED)
    }
}

/// `HandleOutcome` reports what a handler did with an event
#[derive(Debug, Clone, PartialEq)]
pub enum HandleOutcome {
    /// the event settled the relationship signal
    Resolved(RelationshipKind),

    /// terminal event for a signal that was already settled, or never armed
    AlreadySettled(RelationshipKind),

    /// another peer of a multi-use relationship went active after the signal settled
    Activated(RelationshipKind),

    /// intermediate event for a tracked relationship
    Recorded(RelationshipKind),

    /// the event belongs to no tracked relationship
    Unmatched,

    /// the event was only logged
    Logged,
}

/// `DispatchOutcome` is the dispatcher level result, it is never an error
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Handled(HandleOutcome),
    UnknownTopic(String),
    Failed(WebhookError),
}

/// `TopicHandler` processes the payloads of one topic
#[async_trait]
pub trait TopicHandler: Send + Sync {
    async fn handle(&self, payload: &Value) -> Result<HandleOutcome, WebhookError>;
}

/// `ActivationHook` runs once after a relationship's first successful resolution
#[async_trait]
pub trait ActivationHook: Send + Sync {
    async fn on_active(&self, connection_id: &ConnectionID) -> Result<(), WebhookError>;
}

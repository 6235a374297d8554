use std::collections::HashSet;

use super::signal::ReadinessSignal;
use super::types::{ConnectionID, RelationshipKind, SignalState};

/// `Relationship` is the controller's record of one logical peer link
///
/// The signal slot is only written by the connection initiator (arm) and the webhook
/// dispatcher (resolve), and cleared by the single waiter once it resumes
///
/// A multi-use relationship keeps every connection id it adopted, one per peer that
/// answered the same invitation, and remembers which of them already went active
#[derive(Debug, Clone)]
pub struct Relationship {
    kind: RelationshipKind,
    connection_id: Option<ConnectionID>,
    invitation_msg_id: Option<String>,
    multi_use: bool,
    adopted: HashSet<ConnectionID>,
    activated: HashSet<ConnectionID>,
    signal: Option<ReadinessSignal>,
}

impl Relationship {
    pub fn new(kind: RelationshipKind) -> Self {
        Self {
            kind,
            connection_id: None,
            invitation_msg_id: None,
            multi_use: false,
            adopted: HashSet::new(),
            activated: HashSet::new(),
            signal: None,
        }
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn connection_id(&self) -> Option<&ConnectionID> {
        self.connection_id.as_ref()
    }

    pub fn invitation_msg_id(&self) -> Option<&str> {
        self.invitation_msg_id.as_deref()
    }

    pub fn is_multi_use(&self) -> bool {
        self.multi_use
    }

    pub fn signal(&self) -> Option<&ReadinessSignal> {
        self.signal.as_ref()
    }

    /// `signal_state` is `None` when no attempt is in flight
    pub fn signal_state(&self) -> Option<SignalState> {
        self.signal.as_ref().map(|signal| signal.state())
    }

    pub fn is_pending(&self) -> bool {
        self.signal
            .as_ref()
            .map(|signal| !signal.is_settled())
            .unwrap_or(false)
    }

    pub fn matches_connection(&self, connection_id: &ConnectionID) -> bool {
        self.connection_id.as_ref() == Some(connection_id) || self.adopted.contains(connection_id)
    }

    pub fn is_activated(&self, connection_id: &ConnectionID) -> bool {
        self.activated.contains(connection_id)
    }

    pub fn matches_invitation(&self, invitation_msg_id: &str) -> bool {
        self.invitation_msg_id.as_deref() == Some(invitation_msg_id)
    }

    pub(super) fn start_attempt(&mut self, signal: ReadinessSignal) {
        self.connection_id = None;
        self.invitation_msg_id = None;
        self.multi_use = false;
        self.adopted.clear();
        self.activated.clear();
        self.signal = Some(signal);
    }

    pub(super) fn set_connection_id(&mut self, connection_id: ConnectionID) {
        self.connection_id = Some(connection_id);
    }

    pub(super) fn adopt(&mut self, connection_id: ConnectionID) {
        self.adopted.insert(connection_id.clone());
        self.connection_id = Some(connection_id);
    }

    /// `activate` returns `true` only the first time `connection_id` goes active
    pub(super) fn activate(&mut self, connection_id: &ConnectionID) -> bool {
        self.activated.insert(connection_id.clone())
    }

    pub(super) fn set_invitation_msg_id(&mut self, invitation_msg_id: String) {
        self.invitation_msg_id = Some(invitation_msg_id);
    }

    pub(super) fn set_multi_use(&mut self, multi_use: bool) {
        self.multi_use = multi_use;
    }

    pub(super) fn clear_signal_if(&mut self, signal: &ReadinessSignal) {
        let same = self
            .signal
            .as_ref()
            .map(|current| current.same_as(signal))
            .unwrap_or(false);

        if same {
            self.signal = None;
        }
    }
}

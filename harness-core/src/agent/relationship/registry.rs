use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use rst_common::with_logging::log::{debug, warn};

use super::relationship::Relationship;
use super::signal::ReadinessSignal;
use super::types::{ConnectionID, RelationshipKind, SignalError, SignalState};

/// `Relationships` is the controller-owned set of tracked relationships
///
/// Clones share the same records. The inner lock is only held for short synchronous
/// sections and never across an await point, so the webhook path can always resolve a
/// signal while an initiator is suspended on it.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    records: Arc<Mutex<BTreeMap<RelationshipKind, Relationship>>>,
}

impl Relationships {
    pub fn new(kinds: &[RelationshipKind]) -> Self {
        let relationships = Self::default();
        for kind in kinds {
            relationships.track(*kind);
        }

        relationships
    }

    pub fn track(&self, kind: RelationshipKind) {
        self.lock()
            .entry(kind)
            .or_insert_with(|| Relationship::new(kind));
    }

    pub fn is_tracked(&self, kind: RelationshipKind) -> bool {
        self.lock().contains_key(&kind)
    }

    /// `arm` starts a new connection attempt with a fresh pending signal
    ///
    /// A pending signal that a waiter is currently suspended on is never replaced,
    /// doing so would strand that waiter. A pending signal nobody awaits (for example
    /// after a failed admin request) is replaced.
    pub fn arm(&self, kind: RelationshipKind) -> Result<ReadinessSignal, SignalError> {
        self.with(kind, |relationship| {
            let awaited = relationship
                .signal()
                .map(|signal| !signal.is_settled() && signal.has_waiters())
                .unwrap_or(false);

            if awaited {
                warn!("[relationship:arm] {kind} has a suspended waiter, refusing to re-arm");
                return Err(SignalError::AlreadyArmed(kind));
            }

            if relationship.is_pending() {
                warn!("[relationship:arm] {kind} replaces an unawaited pending attempt");
            }

            let signal = ReadinessSignal::new();
            relationship.start_attempt(signal.clone());
            debug!("[relationship:arm] {kind} armed");
            Ok(signal)
        })?
    }

    /// `resolve` settles the current signal, returns `true` only when this call settled it
    ///
    /// Resolving a relationship without an armed signal, or with an already settled one,
    /// is a no-op
    pub fn resolve(&self, kind: RelationshipKind, success: bool) -> Result<bool, SignalError> {
        self.with(kind, |relationship| {
            relationship
                .signal()
                .map(|signal| signal.resolve(success))
                .unwrap_or(false)
        })
    }

    /// `await_ready` suspends until the armed signal settles, clears the slot and returns
    /// whether the relationship is ready
    pub async fn await_ready(&self, kind: RelationshipKind) -> Result<bool, SignalError> {
        let signal = self
            .with(kind, |relationship| relationship.signal().cloned())?
            .ok_or(SignalError::NotArmed(kind))?;

        debug!("[relationship:await_ready] waiting for {kind}");
        let ready = signal.wait().await;

        self.with(kind, |relationship| relationship.clear_signal_if(&signal))?;
        debug!("[relationship:await_ready] {kind} settled, ready: {ready}");
        Ok(ready)
    }

    /// `is_ready` never suspends, an unarmed or pending relationship is not ready
    pub fn is_ready(&self, kind: RelationshipKind) -> bool {
        self.with(kind, |relationship| {
            relationship
                .signal()
                .map(|signal| signal.is_ready())
                .unwrap_or(false)
        })
        .unwrap_or(false)
    }

    pub fn record_connection(
        &self,
        kind: RelationshipKind,
        connection_id: ConnectionID,
    ) -> Result<(), SignalError> {
        self.with(kind, |relationship| {
            if !relationship.matches_connection(&connection_id) {
                debug!("[relationship:record_connection] {kind}: {connection_id}");
                relationship.set_connection_id(connection_id);
            }
        })
    }

    pub fn record_invitation(
        &self,
        kind: RelationshipKind,
        invitation_msg_id: String,
    ) -> Result<(), SignalError> {
        self.with(kind, |relationship| {
            relationship.set_invitation_msg_id(invitation_msg_id)
        })
    }

    pub fn mark_multi_use(&self, kind: RelationshipKind, multi_use: bool) -> Result<(), SignalError> {
        self.with(kind, |relationship| relationship.set_multi_use(multi_use))
    }

    /// `activate` marks `connection_id` of `kind` as active, returns `true` only the
    /// first time, so replayed events never repeat the activation work
    ///
    /// An attempt that already settled as failed activates nothing
    pub fn activate(
        &self,
        kind: RelationshipKind,
        connection_id: &ConnectionID,
    ) -> Result<bool, SignalError> {
        self.with(kind, |relationship| {
            if relationship.signal_state() == Some(SignalState::Failed) {
                return false;
            }

            relationship.activate(connection_id)
        })
    }

    pub fn connection_id(&self, kind: RelationshipKind) -> Option<ConnectionID> {
        self.get(kind)
            .and_then(|relationship| relationship.connection_id().cloned())
    }

    pub fn get(&self, kind: RelationshipKind) -> Option<Relationship> {
        self.lock().get(&kind).cloned()
    }

    pub fn list(&self) -> Vec<Relationship> {
        self.lock().values().cloned().collect()
    }

    /// `match_connection` finds the relationship a connection event belongs to
    ///
    /// Matching order:
    ///
    /// 1. equal connection id
    /// 2. equal invitation message id, the event connection id gets recorded
    /// 3. a `request` on a multi-use relationship, the requester connection id gets
    ///    adopted, whether or not an attempt is still pending
    pub fn match_connection(
        &self,
        connection_id: &ConnectionID,
        invitation_msg_id: Option<&str>,
        is_request: bool,
    ) -> Option<RelationshipKind> {
        let mut records = self.lock();

        if let Some(relationship) = records
            .values()
            .find(|relationship| relationship.matches_connection(connection_id))
        {
            return Some(relationship.kind());
        }

        if let Some(invitation_msg_id) = invitation_msg_id {
            if let Some(relationship) = records
                .values_mut()
                .find(|relationship| relationship.matches_invitation(invitation_msg_id))
            {
                debug!(
                    "[relationship:match] {} adopts {connection_id} by invitation",
                    relationship.kind()
                );
                relationship.set_connection_id(connection_id.clone());
                return Some(relationship.kind());
            }
        }

        if is_request {
            if let Some(relationship) = records
                .values_mut()
                .find(|relationship| relationship.is_multi_use())
            {
                debug!(
                    "[relationship:match] {} adopts {connection_id} from multi-use request",
                    relationship.kind()
                );
                relationship.adopt(connection_id.clone());
                return Some(relationship.kind());
            }
        }

        None
    }

    fn with<R>(
        &self,
        kind: RelationshipKind,
        f: impl FnOnce(&mut Relationship) -> R,
    ) -> Result<R, SignalError> {
        let mut records = self.lock();
        let relationship = records
            .get_mut(&kind)
            .ok_or(SignalError::UnknownRelationship(kind))?;

        Ok(f(relationship))
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<RelationshipKind, Relationship>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

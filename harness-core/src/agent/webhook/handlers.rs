use std::collections::HashMap;
use std::sync::Arc;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde_json::Value;
use rst_common::with_logging::log::{debug, info, warn};

use crate::agent::admin::response::field_str;
use crate::agent::relationship::types::{ConnectionID, RelationshipKind};
use crate::agent::relationship::Relationships;

use super::types::{
    ActivationHook, ConnectionEvent, HandleOutcome, Topic, TopicHandler, WebhookError,
};

/// `ConnectionsHandler` resolves readiness signals from `connections` events
///
/// Only a terminal label on a matched relationship settles a signal, every other
/// event at most records the connection id. The activation hook of a relationship
/// runs once per connection id that goes active.
#[derive(Clone)]
pub struct ConnectionsHandler {
    relationships: Relationships,
    hooks: HashMap<RelationshipKind, Arc<dyn ActivationHook>>,
}

impl ConnectionsHandler {
    pub fn new(relationships: Relationships) -> Self {
        Self {
            relationships,
            hooks: HashMap::new(),
        }
    }

    pub fn with_hook(mut self, kind: RelationshipKind, hook: Arc<dyn ActivationHook>) -> Self {
        self.hooks.insert(kind, hook);
        self
    }

    async fn run_hook(&self, kind: RelationshipKind, connection_id: &ConnectionID) {
        if let Some(hook) = self.hooks.get(&kind) {
            if let Err(err) = hook.on_active(connection_id).await {
                warn!("[webhook:connections] {kind} activation hook failed: {err}");
            }
        }
    }
}

#[async_trait]
impl TopicHandler for ConnectionsHandler {
    async fn handle(&self, payload: &Value) -> Result<HandleOutcome, WebhookError> {
        let event = ConnectionEvent::from_payload(payload)?;
        debug!(
            "[webhook:connections] {} state: {} rfc23_state: {:?}",
            event.connection_id, event.state, event.rfc23_state
        );

        let kind = match self.relationships.match_connection(
            &event.connection_id,
            event.invitation_msg_id.as_deref(),
            event.is_request(),
        ) {
            Some(kind) => kind,
            None => {
                debug!(
                    "[webhook:connections] {} matches no relationship",
                    event.connection_id
                );
                return Ok(HandleOutcome::Unmatched);
            }
        };

        if event.is_terminal_success() {
            let settled = self.relationships.resolve(kind, true)?;
            let first_active = self.relationships.activate(kind, &event.connection_id)?;

            if first_active {
                info!("[webhook:connections] {kind} connected: {}", event.connection_id);
                self.run_hook(kind, &event.connection_id).await;
            }

            return Ok(match (settled, first_active) {
                (true, _) => HandleOutcome::Resolved(kind),
                (false, true) => HandleOutcome::Activated(kind),
                (false, false) => HandleOutcome::AlreadySettled(kind),
            });
        }

        if event.is_terminal_failure() {
            let settled = self.relationships.resolve(kind, false)?;
            if !settled {
                return Ok(HandleOutcome::AlreadySettled(kind));
            }

            warn!(
                "[webhook:connections] {kind} connection failed: {} ({})",
                event.connection_id, event.state
            );
            return Ok(HandleOutcome::Resolved(kind));
        }

        Ok(HandleOutcome::Recorded(kind))
    }
}

/// `ConnectionReuseHandler` handles `connection_reuse` and `connection_reuse_accepted`
///
/// The agent skips the handshake and points at an existing connection, the pending
/// attempt of `kind` adopts it and is settled as ready
#[derive(Clone)]
pub struct ConnectionReuseHandler {
    relationships: Relationships,
    kind: RelationshipKind,
}

impl ConnectionReuseHandler {
    pub fn new(relationships: Relationships, kind: RelationshipKind) -> Self {
        Self {
            relationships,
            kind,
        }
    }
}

#[async_trait]
impl TopicHandler for ConnectionReuseHandler {
    async fn handle(&self, payload: &Value) -> Result<HandleOutcome, WebhookError> {
        let connection_id = field_str(payload, "connection_id")
            .map(ConnectionID::from)
            .ok_or(WebhookError::MalformedPayload(String::from(
                "missing connection_id",
            )))?;

        let kind = self
            .relationships
            .match_connection(&connection_id, None, false)
            .unwrap_or(self.kind);

        let pending = self
            .relationships
            .get(kind)
            .map(|relationship| relationship.is_pending())
            .unwrap_or(false);

        if !pending {
            return Ok(HandleOutcome::AlreadySettled(kind));
        }

        self.relationships
            .record_connection(kind, connection_id.clone())?;
        let _ = self.relationships.resolve(kind, true)?;

        info!("[webhook:connection_reuse] {kind} connected: {connection_id}");
        Ok(HandleOutcome::Resolved(kind))
    }
}

#[derive(Clone, Default)]
pub struct BasicMessageHandler;

#[async_trait]
impl TopicHandler for BasicMessageHandler {
    async fn handle(&self, payload: &Value) -> Result<HandleOutcome, WebhookError> {
        let content = field_str(payload, "content").ok_or(WebhookError::MalformedPayload(
            String::from("missing content"),
        ))?;

        info!("[webhook:basicmessages] Received message: {content}");
        Ok(HandleOutcome::Logged)
    }
}

/// `LogHandler` is the stub handler for topics whose protocol logic lives in the agent
#[derive(Clone)]
pub struct LogHandler {
    topic: Topic,
}

impl LogHandler {
    pub fn new(topic: Topic) -> Self {
        Self { topic }
    }
}

#[async_trait]
impl TopicHandler for LogHandler {
    async fn handle(&self, payload: &Value) -> Result<HandleOutcome, WebhookError> {
        let state = field_str(payload, "state").unwrap_or(String::from("unknown"));
        info!("[webhook:{}] received, state: {state}", self.topic);
        Ok(HandleOutcome::Logged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use rst_common::standard::serde_json::json;
    use rst_common::with_tokio::tokio;

    use crate::agent::relationship::types::SignalState;

    struct CountingHook {
        calls: Arc<AtomicU32>,
        fail: bool,
    }

    #[async_trait]
    impl ActivationHook for CountingHook {
        async fn on_active(&self, _connection_id: &ConnectionID) -> Result<(), WebhookError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(WebhookError::HookError("boom".to_string()));
            }

            Ok(())
        }
    }

    fn generate_relationships() -> Relationships {
        Relationships::new(&[
            RelationshipKind::Own,
            RelationshipKind::Mediator,
            RelationshipKind::Endorser,
        ])
    }

    fn armed(kind: RelationshipKind, connection_id: &str) -> Relationships {
        let relationships = generate_relationships();
        relationships.arm(kind).unwrap();
        relationships
            .record_connection(kind, ConnectionID::from(connection_id))
            .unwrap();
        relationships
    }

    #[tokio::test]
    async fn test_request_then_active() {
        let relationships = armed(RelationshipKind::Own, "c1");
        let handler = ConnectionsHandler::new(relationships.clone());

        let outcome = handler
            .handle(&json!({"connection_id": "c1", "state": "request"}))
            .await;
        assert_eq!(outcome, Ok(HandleOutcome::Recorded(RelationshipKind::Own)));
        assert!(!relationships.is_ready(RelationshipKind::Own));

        let outcome = handler
            .handle(&json!({"connection_id": "c1", "state": "active"}))
            .await;
        assert_eq!(outcome, Ok(HandleOutcome::Resolved(RelationshipKind::Own)));
        assert!(relationships.is_ready(RelationshipKind::Own));

        let ready = relationships.await_ready(RelationshipKind::Own).await;
        assert_eq!(ready, Ok(true));
        assert!(relationships
            .get(RelationshipKind::Own)
            .unwrap()
            .signal()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_active_resolves_once() {
        let relationships = armed(RelationshipKind::Mediator, "m1");
        let calls = Arc::new(AtomicU32::new(0));
        let handler = ConnectionsHandler::new(relationships.clone()).with_hook(
            RelationshipKind::Mediator,
            Arc::new(CountingHook {
                calls: calls.clone(),
                fail: false,
            }),
        );

        let event = json!({"connection_id": "m1", "state": "active"});
        let first = handler.handle(&event).await;
        let second = handler.handle(&event).await;
        let third = handler.handle(&event).await;

        assert_eq!(first, Ok(HandleOutcome::Resolved(RelationshipKind::Mediator)));
        assert_eq!(
            second,
            Ok(HandleOutcome::AlreadySettled(RelationshipKind::Mediator))
        );
        assert_eq!(
            third,
            Ok(HandleOutcome::AlreadySettled(RelationshipKind::Mediator))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(relationships.is_ready(RelationshipKind::Mediator));
    }

    #[tokio::test]
    async fn test_non_terminal_events_keep_pending() {
        let relationships = armed(RelationshipKind::Own, "c1");
        let handler = ConnectionsHandler::new(relationships.clone());

        for state in ["invitation", "request", "response"] {
            let outcome = handler
                .handle(&json!({"connection_id": "c1", "state": state}))
                .await;
            assert_eq!(outcome, Ok(HandleOutcome::Recorded(RelationshipKind::Own)));
            assert!(!relationships.is_ready(RelationshipKind::Own));
        }

        let relationship = relationships.get(RelationshipKind::Own).unwrap();
        assert_eq!(relationship.signal_state(), Some(SignalState::Pending));
    }

    #[tokio::test]
    async fn test_untracked_connection_dropped() {
        let relationships = armed(RelationshipKind::Own, "c1");
        let handler = ConnectionsHandler::new(relationships.clone());

        let outcome = handler
            .handle(&json!({"connection_id": "other", "state": "active"}))
            .await;
        assert_eq!(outcome, Ok(HandleOutcome::Unmatched));
        assert!(!relationships.is_ready(RelationshipKind::Own));
    }

    #[tokio::test]
    async fn test_abandoned_resolves_failure() {
        let relationships = armed(RelationshipKind::Endorser, "e1");
        let handler = ConnectionsHandler::new(relationships.clone());

        let outcome = handler
            .handle(&json!({"connection_id": "e1", "state": "abandoned"}))
            .await;
        assert_eq!(outcome, Ok(HandleOutcome::Resolved(RelationshipKind::Endorser)));
        assert!(!relationships.is_ready(RelationshipKind::Endorser));

        let late_active = handler
            .handle(&json!({"connection_id": "e1", "state": "active"}))
            .await;
        assert_eq!(
            late_active,
            Ok(HandleOutcome::AlreadySettled(RelationshipKind::Endorser))
        );
        assert_eq!(
            relationships.await_ready(RelationshipKind::Endorser).await,
            Ok(false)
        );
    }

    #[tokio::test]
    async fn test_failing_hook_does_not_fail_event() {
        let relationships = armed(RelationshipKind::Endorser, "e1");
        let calls = Arc::new(AtomicU32::new(0));
        let handler = ConnectionsHandler::new(relationships.clone()).with_hook(
            RelationshipKind::Endorser,
            Arc::new(CountingHook {
                calls: calls.clone(),
                fail: true,
            }),
        );

        let outcome = handler
            .handle(&json!({"connection_id": "e1", "state": "active"}))
            .await;
        assert_eq!(outcome, Ok(HandleOutcome::Resolved(RelationshipKind::Endorser)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_reuse_resolves_pending_relationship() {
        let relationships = generate_relationships();
        relationships.arm(RelationshipKind::Own).unwrap();
        let handler = ConnectionReuseHandler::new(relationships.clone(), RelationshipKind::Own);

        let outcome = handler
            .handle(&json!({"connection_id": "existing", "thread_id": "t1"}))
            .await;
        assert_eq!(outcome, Ok(HandleOutcome::Resolved(RelationshipKind::Own)));
        assert!(relationships.is_ready(RelationshipKind::Own));
        assert_eq!(
            relationships.connection_id(RelationshipKind::Own),
            Some(ConnectionID::from("existing"))
        );

        let again = handler
            .handle(&json!({"connection_id": "existing"}))
            .await;
        assert_eq!(again, Ok(HandleOutcome::AlreadySettled(RelationshipKind::Own)));
    }

    #[tokio::test]
    async fn test_every_multi_use_author_activated() {
        let relationships = armed(RelationshipKind::Endorser, "e0");
        relationships
            .mark_multi_use(RelationshipKind::Endorser, true)
            .unwrap();

        let calls = Arc::new(AtomicU32::new(0));
        let handler = ConnectionsHandler::new(relationships.clone()).with_hook(
            RelationshipKind::Endorser,
            Arc::new(CountingHook {
                calls: calls.clone(),
                fail: false,
            }),
        );

        let request = handler
            .handle(&json!({"connection_id": "a1", "state": "request"}))
            .await;
        assert_eq!(request, Ok(HandleOutcome::Recorded(RelationshipKind::Endorser)));

        let active = handler
            .handle(&json!({"connection_id": "a1", "state": "active"}))
            .await;
        assert_eq!(active, Ok(HandleOutcome::Resolved(RelationshipKind::Endorser)));
        assert_eq!(
            relationships.await_ready(RelationshipKind::Endorser).await,
            Ok(true)
        );

        let request = handler
            .handle(&json!({"connection_id": "a2", "state": "request"}))
            .await;
        assert_eq!(request, Ok(HandleOutcome::Recorded(RelationshipKind::Endorser)));

        let active = handler
            .handle(&json!({"connection_id": "a2", "state": "active"}))
            .await;
        assert_eq!(active, Ok(HandleOutcome::Activated(RelationshipKind::Endorser)));

        for author in ["a1", "a2"] {
            let replay = handler
                .handle(&json!({"connection_id": author, "state": "completed"}))
                .await;
            assert_eq!(
                replay,
                Ok(HandleOutcome::AlreadySettled(RelationshipKind::Endorser))
            );
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_basic_message_requires_content() {
        let handler = BasicMessageHandler;
        assert_eq!(
            handler.handle(&json!({"content": "hello"})).await,
            Ok(HandleOutcome::Logged)
        );
        assert!(matches!(
            handler.handle(&json!({})).await,
            Err(WebhookError::MalformedPayload(_))
        ));
    }
}

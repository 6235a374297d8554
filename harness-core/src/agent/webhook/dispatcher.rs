use std::collections::HashMap;
use std::sync::Arc;

use rst_common::with_logging::log::{debug, warn};

use crate::agent::relationship::types::RelationshipKind;
use crate::agent::relationship::Relationships;

use super::handlers::{BasicMessageHandler, ConnectionReuseHandler, ConnectionsHandler, LogHandler};
use super::types::{ActivationHook, DispatchOutcome, Topic, TopicHandler, WebhookEvent};

/// `Dispatcher` routes webhook events to the handler registered for their topic
///
/// Dispatching never fails: unknown topics are dropped and handler errors are
/// logged, the agent always gets its delivery acknowledged
#[derive(Clone, Default)]
pub struct Dispatcher {
    handlers: HashMap<Topic, Arc<dyn TopicHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, topic: Topic, handler: Arc<dyn TopicHandler>) -> Self {
        self.handlers.insert(topic, handler);
        self
    }

    /// `standard` wires every known topic, connection events drive `relationships`
    ///
    /// Connection reuse events are attributed to [`RelationshipKind::Own`] unless their
    /// connection id is already tracked
    pub fn standard(
        relationships: Relationships,
        hooks: Vec<(RelationshipKind, Arc<dyn ActivationHook>)>,
    ) -> Self {
        let connections = hooks
            .into_iter()
            .fold(ConnectionsHandler::new(relationships.clone()), |handler, (kind, hook)| {
                handler.with_hook(kind, hook)
            });

        let reuse = Arc::new(ConnectionReuseHandler::new(
            relationships,
            RelationshipKind::Own,
        ));

        let dispatcher = Self::new()
            .register(Topic::Connections, Arc::new(connections))
            .register(Topic::ConnectionReuse, reuse.clone())
            .register(Topic::ConnectionReuseAccepted, reuse)
            .register(Topic::BasicMessages, Arc::new(BasicMessageHandler));

        let log_only: Vec<Topic> = Topic::ALL
            .into_iter()
            .filter(|topic| !dispatcher.handles(*topic))
            .collect();

        log_only
            .into_iter()
            .fold(dispatcher, |dispatcher, topic| {
                dispatcher.register(topic, Arc::new(LogHandler::new(topic)))
            })
    }

    pub fn handles(&self, topic: Topic) -> bool {
        self.handlers.contains_key(&topic)
    }

    pub fn topics(&self) -> Vec<Topic> {
        let mut topics: Vec<Topic> = self.handlers.keys().copied().collect();
        topics.sort_by_key(|topic| topic.as_str());
        topics
    }

    pub async fn dispatch(&self, event: WebhookEvent) -> DispatchOutcome {
        let handler = Topic::parse(event.topic())
            .and_then(|topic| self.handlers.get(&topic).map(|handler| (topic, handler)));

        let (topic, handler) = match handler {
            Some(found) => found,
            None => {
                debug!("[webhook:dispatch] dropped unknown topic: {}", event.topic());
                return DispatchOutcome::UnknownTopic(event.topic().to_string());
            }
        };

        match handler.handle(event.payload()).await {
            Ok(outcome) => {
                debug!("[webhook:dispatch] {topic}: {outcome:?}");
                DispatchOutcome::Handled(outcome)
            }
            Err(err) => {
                warn!("[webhook:dispatch] {topic} handler failed: {err}");
                DispatchOutcome::Failed(err)
            }
        }
    }
}

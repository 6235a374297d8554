use std::net::SocketAddr;
use std::sync::Arc;

use rst_common::standard::serde_json::{self, Value};
use rst_common::with_http_tokio::axum::body::Bytes;
use rst_common::with_http_tokio::axum::extract::State;
use rst_common::with_http_tokio::axum::http::{Method, StatusCode, Uri};
use rst_common::with_http_tokio::axum::{self, Router};
use rst_common::with_http_tokio::tower_http::trace::TraceLayer;
use rst_common::with_logging::log::{debug, info, warn};
use rst_common::with_tokio::tokio::net::TcpListener;

use identity_harness_core::agent::webhook::types::WebhookEvent;
use identity_harness_core::agent::webhook::Dispatcher;

use crate::common::types::CommonError;
use crate::config::Webhook;

const TOPIC_SEGMENT: &str = "topic";

#[derive(Clone)]
struct WebhookState {
    prefix: String,
    dispatcher: Dispatcher,
}

/// `WebhookServer` is the inbound path of the rendezvous
///
/// The agent posts every event to `<prefix>/topic/<topic>/`. Any well formed topic
/// path is acknowledged with `200`, even when the topic is unknown or the body can't
/// be decoded, so the agent never redelivers. Other paths get `404`.
pub struct WebhookServer {
    address: String,
    state: Arc<WebhookState>,
}

impl WebhookServer {
    pub fn new(config: &Webhook, dispatcher: Dispatcher) -> Self {
        Self {
            address: config.address(),
            state: Arc::new(WebhookState {
                prefix: config.prefix(),
                dispatcher,
            }),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .fallback(topic_handler)
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http())
    }

    pub async fn bind(&self) -> Result<(TcpListener, SocketAddr), CommonError> {
        let listener = TcpListener::bind(&self.address)
            .await
            .map_err(|err| CommonError::WebhookError(err.to_string()))?;

        let addr = listener
            .local_addr()
            .map_err(|err| CommonError::WebhookError(err.to_string()))?;

        Ok((listener, addr))
    }

    pub async fn serve(&self) -> Result<(), CommonError> {
        let (listener, addr) = self.bind().await?;
        info!("[webhook:serve] listening on {addr}");
        self.serve_on(listener).await
    }

    pub async fn serve_on(&self, listener: TcpListener) -> Result<(), CommonError> {
        axum::serve(listener, self.router())
            .await
            .map_err(|err| CommonError::WebhookError(err.to_string()))
    }
}

async fn topic_handler(
    State(state): State<Arc<WebhookState>>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> StatusCode {
    let topic = match parse_topic_path(&state.prefix, uri.path()) {
        Some(topic) => topic,
        None => {
            warn!("[webhook:receive] unmatched request: {method} {uri}");
            return StatusCode::NOT_FOUND;
        }
    };

    if method != Method::POST {
        return StatusCode::METHOD_NOT_ALLOWED;
    }

    let payload = match serde_json::from_slice::<Value>(&body) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("[webhook:receive] {topic} malformed body: {err}");
            return StatusCode::OK;
        }
    };

    let outcome = state
        .dispatcher
        .dispatch(WebhookEvent::new(topic.clone(), payload))
        .await;

    debug!("[webhook:receive] {topic}: {outcome:?}");
    StatusCode::OK
}

/// `parse_topic_path` extracts the topic from `<prefix>/topic/<topic>/`
pub fn parse_topic_path(prefix: &str, path: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?;
    let mut segments = rest.trim_matches('/').split('/');

    match (segments.next(), segments.next(), segments.next()) {
        (Some(TOPIC_SEGMENT), Some(topic), None) if !topic.is_empty() => Some(topic.to_string()),
        _ => None,
    }
}

use std::time::Duration;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};
use rst_common::with_tokio::tokio;

use crate::agent::admin::types::AdminError;
use crate::agent::connection::types::ConnectionError;
use crate::agent::relationship::types::{ConnectionID, SignalError};

pub const DEFAULT_POLL_ATTEMPTS: u32 = 3;
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(1);
pub const STATE_GRANTED: &str = "granted";

#[derive(Debug, PartialEq, Error, Clone)]
pub enum MediationError {
    #[error("admin error: {0}")]
    AdminError(#[from] AdminError),

    #[error("signal error: {0}")]
    SignalError(#[from] SignalError),

    #[error("connection error: {0}")]
    ConnectionError(#[from] ConnectionError),

    #[error("mediation request {request_id} not granted after {attempts} attempts")]
    MediationTimeout {
        request_id: MediationRequestID,
        attempts: u32,
    },

    #[error("mediator connection failed")]
    ConnectionFailed,
}

/// Mediation request identifier assigned by the wallet agent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct MediationRequestID(String);

impl MediationRequestID {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for MediationRequestID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for MediationRequestID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for MediationRequestID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `PollConfig` bounds the grant poller: at most `attempts` fetches, each one
/// preceded by a sleep of `delay`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PollConfig {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_POLL_ATTEMPTS,
            delay: DEFAULT_POLL_DELAY,
        }
    }
}

impl PollConfig {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }
}

/// `Delay` is the sleep between two status fetches
#[async_trait]
pub trait Delay: Clone + Send + Sync {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// `MediationGrant` summarizes a finished mediation setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct MediationGrant {
    pub request_id: MediationRequestID,
    pub wallet_connection_id: ConnectionID,
    pub mediator_connection_id: Option<ConnectionID>,
    pub state: String,
}

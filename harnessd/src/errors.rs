use rst_common::with_errors::thiserror::{self, Error};

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("config error: {0}")]
    ConfigError(String),

    #[error("webhook error: {0}")]
    WebhookError(String),

    #[error("mediation error: {0}")]
    MediationError(String),

    #[error("endorser error: {0}")]
    EndorserError(String),
}

use rst_common::with_errors::thiserror::{self, Error};

use identity_harness_core::agent::mediation::types::MediationError;

pub const HARNESS_DEFAULT_DIR: &str = ".harness";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("homedir error: {0}")]
    HomeDirError(String),

    #[error("toml error: {0}")]
    TomlError(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("agent error: {0}")]
    AgentError(String),

    #[error("admin error: {0}")]
    AdminError(String),

    #[error("json error: {0}")]
    JSONError(String),

    #[error("qr error: {0}")]
    QrError(String),

    #[error("ca error: {0}")]
    CaError(String),

    #[error("mediation error: {0}")]
    MediationError(String),
}

/// Transport and status failures of the admin API stay admin errors, a request that
/// was never granted is reported as a mediation error
impl From<MediationError> for CliError {
    fn from(err: MediationError) -> Self {
        match err {
            MediationError::AdminError(err) => CliError::AdminError(err.to_string()),
            other => CliError::MediationError(other.to_string()),
        }
    }
}

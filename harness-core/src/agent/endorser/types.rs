use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

use crate::agent::admin::types::AdminError;
use crate::agent::connection::types::{ConnectionError, InvitationRecord};

pub const ENDORSER_ALIAS: &str = "EndorserMultiuse";
pub const TRANSACTION_ENDORSER: &str = "TRANSACTION_ENDORSER";

#[derive(Debug, PartialEq, Error, Clone)]
pub enum EndorserError {
    #[error("admin error: {0}")]
    AdminError(#[from] AdminError),

    #[error("connection error: {0}")]
    ConnectionError(#[from] ConnectionError),
}

/// `EndorserInfo` is what authors need to connect to the endorser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct EndorserInfo {
    pub invitation: InvitationRecord,
    pub public_did: String,
}

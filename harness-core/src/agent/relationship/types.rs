use std::fmt;

use derive_more::{AsRef, Display, From, Into};
use the_newtype::Newtype;

use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

/// Connection identifier assigned by the external agent
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Newtype, From, Into, AsRef, Display,
)]
#[serde(crate = "self::serde")]
pub struct ConnectionID(String);

impl ConnectionID {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConnectionID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// `RelationshipKind` names the logical peer links a controller tracks
///
/// `Own` is the controller's own connection to its counterpart (printed as `self`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    #[serde(rename = "self")]
    Own,
    Mediator,
    Endorser,
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RelationshipKind::Own => write!(f, "self"),
            RelationshipKind::Mediator => write!(f, "mediator"),
            RelationshipKind::Endorser => write!(f, "endorser"),
        }
    }
}

/// `SignalState` is the explicit state of a [`super::ReadinessSignal`]
///
/// It only moves from [`SignalState::Pending`] to one of the settled states, never back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalState {
    Pending,
    Ready,
    Failed,
}

impl SignalState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, SignalState::Pending)
    }
}

#[derive(Debug, PartialEq, Error, Clone)]
pub enum SignalError {
    #[error("signal already armed and awaited: {0}")]
    AlreadyArmed(RelationshipKind),

    #[error("signal not armed: {0}")]
    NotArmed(RelationshipKind),

    #[error("unknown relationship: {0}")]
    UnknownRelationship(RelationshipKind),
}

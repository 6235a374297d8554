use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::uuid::Uuid;
use rst_common::with_errors::thiserror::{self, Error};

use crate::agent::admin::types::AdminError;

pub const DEFAULT_CREDDEF_TAG: &str = "default";
pub const DEFAULT_TAILS_FILE_COUNT: u32 = 100;

/// upper bound of every part of a generated schema version
pub const VERSION_PART_MAX: u8 = 101;

#[derive(Debug, PartialEq, Error, Clone)]
pub enum SchemaError {
    #[error("admin error: {0}")]
    AdminError(#[from] AdminError),

    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}

/// `SchemaDefinition` is the schema to publish and its credential definition options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct SchemaDefinition {
    pub name: String,
    pub version: Option<String>,
    pub attributes: Vec<String>,

    #[serde(default)]
    pub tag: Option<String>,

    #[serde(default)]
    pub support_revocation: bool,
}

impl SchemaDefinition {
    pub fn new(name: &str, attributes: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            version: None,
            attributes,
            tag: None,
            support_revocation: false,
        }
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tag = Some(tag.to_string());
        self
    }

    pub fn with_revocation(mut self, support_revocation: bool) -> Self {
        self.support_revocation = support_revocation;
        self
    }
}

/// `PublishedSchema` holds the identifiers the ledger assigned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct PublishedSchema {
    pub schema_id: String,
    pub schema_version: String,
    pub credential_definition_id: String,
}

/// `random_version` builds an `a.b.c` version with every part in `1..=101`
pub fn random_version() -> String {
    let bytes = Uuid::new_v4().into_bytes();
    let parts: Vec<String> = bytes[..3]
        .iter()
        .map(|byte| (byte % VERSION_PART_MAX + 1).to_string())
        .collect();

    parts.join(".")
}

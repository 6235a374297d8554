use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::with_errors::thiserror::{self, Error};

pub const CA_CLIENT_BINARY: &str = "fabric-ca-client";
pub const ID_TYPE_CLIENT: &str = "client";

#[derive(Debug, PartialEq, Error, Clone)]
pub enum CaError {
    #[error("command error: {0}")]
    CommandError(String),

    #[error("exit status: {0}")]
    ExitStatus(i32),
}

/// `CaClientConfig` is the connection and identity data of one CA enrollment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub struct CaClientConfig {
    pub home: String,
    pub address: String,
    pub port: u16,
    pub caname: String,
    pub tls_certfiles: String,
    pub enrollment_id: String,
    pub enrollment_secret: String,
}

impl CaClientConfig {
    pub fn enrollment_url(&self) -> String {
        format!(
            "https://{}:{}@{}:{}",
            self.enrollment_id, self.enrollment_secret, self.address, self.port
        )
    }
}

/// `IdentityRole` are the registration shortcuts, each one maps to a single
/// `ecert` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
#[serde(rename_all = "kebab-case")]
pub enum IdentityRole {
    FlAdmin,
    Trainer,
    Aggregator,
    LeadAggregator,
}

impl IdentityRole {
    pub fn attrs(&self) -> &'static str {
        match self {
            IdentityRole::FlAdmin => "flAdmin=true:ecert",
            IdentityRole::Trainer => "trainer=true:ecert",
            IdentityRole::Aggregator => "aggregator=true:ecert",
            IdentityRole::LeadAggregator => "leadAggregator=true:ecert",
        }
    }
}

/// `CommandRunner` executes an external program and reports its exit code
#[async_trait]
pub trait CommandRunner: Clone + Send + Sync {
    async fn run(&self, program: String, args: Vec<String>) -> Result<i32, CaError>;
}

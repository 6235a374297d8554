use http::Method;

use rst_common::standard::async_trait::async_trait;
use rst_common::standard::serde::{self, Deserialize, Serialize};
use rst_common::standard::serde_json::Value;
use rst_common::with_errors::thiserror::{self, Error};

pub const HEADER_API_KEY: &str = "X-API-Key";

/// `AdminError` covers every failure of a single admin request
///
/// A transport failure, a non-2xx status and an undecodable body are kept apart
/// so the caller can tell a dead agent from a rejected request
#[derive(Debug, PartialEq, Error, Clone, Serialize, Deserialize)]
#[serde(crate = "self::serde")]
pub enum AdminError {
    #[error("transport error: {0}")]
    TransportError(String),

    #[error("status error: {status}: {message}")]
    StatusError { status: u16, message: String },

    #[error("json error: {0}")]
    JSONError(String),

    #[error("missing field: {0}")]
    MissingField(String),
}

/// `AdminRequest` describes a single call to the agent admin API
///
/// The path is relative to the configured admin url, for example
/// `/connections/create-invitation`
#[derive(Debug, Clone, PartialEq)]
pub struct AdminRequest {
    method: Method,
    path: String,
    body: Option<Value>,
    params: Vec<(String, String)>,
}

impl AdminRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            params: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_param(mut self, key: &str, value: impl ToString) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// `AdminAPI` is the only capability this crate needs from an agent: send a request
/// and get a decoded JSON structure back
///
/// Implementations must return an error for transport failures and non-2xx responses,
/// they must never retry on their own
#[async_trait]
pub trait AdminAPI: Clone + Send + Sync {
    async fn send(&self, request: AdminRequest) -> Result<Value, AdminError>;
}

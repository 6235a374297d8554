use rst_common::standard::serde::{self, Deserialize};

use crate::common::types::{CommonError, ToValidate};

pub const DEFAULT_ADMIN_TIMEOUT_SECS: u64 = 30;

fn default_timeout_secs() -> u64 {
    DEFAULT_ADMIN_TIMEOUT_SECS
}

/// `Agent` points to the admin API of one running agent
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
pub struct Agent {
    pub(super) admin_url: String,

    #[serde(default)]
    pub(super) api_key: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub(super) timeout_secs: u64,

    #[serde(default)]
    pub(super) did_exchange: bool,
}

impl Agent {
    pub fn new(admin_url: &str) -> Self {
        Self {
            admin_url: admin_url.to_string(),
            ..Self::default()
        }
    }

    pub fn admin_url(&self) -> String {
        self.admin_url.trim_end_matches('/').to_string()
    }

    pub fn api_key(&self) -> Option<String> {
        self.api_key.to_owned()
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn did_exchange(&self) -> bool {
        self.did_exchange
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self {
            admin_url: "".to_string(),
            api_key: None,
            timeout_secs: DEFAULT_ADMIN_TIMEOUT_SECS,
            did_exchange: false,
        }
    }
}

impl ToValidate for Agent {
    fn validate(&self) -> Result<(), CommonError> {
        if self.admin_url.is_empty() {
            return Err(CommonError::ValidationError(
                "config: agent:admin_url is missing".to_string(),
            ));
        }

        if !self.admin_url.starts_with("http://") && !self.admin_url.starts_with("https://") {
            return Err(CommonError::ValidationError(format!(
                "config: agent:admin_url is not an http url: {}",
                self.admin_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(CommonError::ValidationError(
                "config: agent:timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

use cli_table::Table;

use rst_common::standard::serde::{self, Deserialize, Serialize};

pub(crate) const AGENT_FILE: &str = "agent.toml";
pub(crate) const AGENT_SESSION: &str = "agent.session";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(crate = "self::serde")]
pub(crate) struct AgentConfig {
    name: String,
    admin_url: String,

    #[serde(default)]
    api_key: Option<String>,
}

impl AgentConfig {
    pub(crate) fn name(&self) -> String {
        self.name.to_owned()
    }

    pub(crate) fn admin_url(&self) -> String {
        self.admin_url.to_owned()
    }

    pub(crate) fn api_key(&self) -> Option<String> {
        self.api_key.to_owned()
    }
}

/// `AgentRow` is the printable form of an [`AgentConfig`], the api key is never shown
#[derive(Table)]
pub(crate) struct AgentRow {
    #[table(title = "Name")]
    name: String,
    #[table(title = "Admin URL")]
    admin_url: String,
    #[table(title = "API Key")]
    api_key: String,
}

impl From<AgentConfig> for AgentRow {
    fn from(agent: AgentConfig) -> Self {
        let api_key = match agent.api_key {
            Some(_) => String::from("set"),
            None => String::from("-"),
        };

        Self {
            name: agent.name,
            admin_url: agent.admin_url,
            api_key,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(crate = "self::serde")]
pub(crate) struct AgentToml {
    agents: Vec<AgentConfig>,
}

impl AgentToml {
    pub(crate) fn new(name: String, admin_url: String, api_key: Option<String>) -> Self {
        let mut agent_toml = Self::default();
        agent_toml.add(name, admin_url, api_key);
        agent_toml
    }

    /// `add` replaces an agent with the same name
    pub(crate) fn add(&mut self, name: String, admin_url: String, api_key: Option<String>) {
        self.agents.retain(|agent| agent.name != name);
        self.agents.push(AgentConfig {
            name,
            admin_url,
            api_key,
        });
    }

    pub(crate) fn find(&self, name: &str) -> Option<AgentConfig> {
        self.agents.iter().find(|agent| agent.name == name).cloned()
    }

    pub(crate) fn agents(&self) -> Vec<AgentConfig> {
        self.agents.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_replaces_same_name() {
        let mut agent_toml = AgentToml::new(
            "issuer".to_string(),
            "http://localhost:8021".to_string(),
            None,
        );
        agent_toml.add(
            "holder".to_string(),
            "http://localhost:8031".to_string(),
            None,
        );
        agent_toml.add(
            "issuer".to_string(),
            "http://localhost:9021".to_string(),
            Some("secret".to_string()),
        );

        assert_eq!(agent_toml.agents().len(), 2);

        let issuer = agent_toml.find("issuer").unwrap();
        assert_eq!(issuer.admin_url(), "http://localhost:9021");
        assert_eq!(issuer.api_key(), Some("secret".to_string()));
        assert!(agent_toml.find("verifier").is_none());
    }

    #[test]
    fn test_toml_roundtrip_keeps_optional_key() {
        let agent_toml = AgentToml::new(
            "issuer".to_string(),
            "http://localhost:8021".to_string(),
            None,
        );

        let encoded = toml::to_string(&agent_toml).unwrap();
        let decoded: AgentToml = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.agents(), agent_toml.agents());
    }
}

use rst_common::with_logging::log::{debug, warn};

#[derive(Clone)]
pub struct Config {
    log_level: String,
    harness_dir: String,
}

impl Config {
    fn new(log_level: String, harness_dir: String) -> Self {
        Self {
            log_level,
            harness_dir,
        }
    }

    pub fn log_level(&self) -> String {
        self.log_level.clone()
    }

    pub fn harness_dir(&self) -> String {
        self.harness_dir.clone()
    }
}

#[derive(Default)]
pub struct ContextHandler {
    config: Option<Config>,
    agent: Option<String>,
}

impl ContextHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build_config(&mut self, log_level: String, harness_dir: String) -> &mut Self {
        debug!("[build config] log_level: {log_level} | harness_dir: {harness_dir}");

        let config = Config::new(log_level, harness_dir);
        self.config = Some(config);
        self
    }

    pub fn set_agent(&mut self, agent_name: Option<String>) -> &mut Self {
        match &agent_name {
            Some(name) => debug!("[ctx:set_agent] agent name: {name}"),
            None => warn!("[ctx:set_agent] empty agent name"),
        }

        self.agent = agent_name;
        self
    }

    pub fn config(&self) -> Option<Config> {
        self.config.clone()
    }

    pub fn agent(&self) -> Option<String> {
        self.agent.clone()
    }
}

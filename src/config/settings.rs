use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::core::client::DEFAULT_USER_AGENT;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8181";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;
pub const MAX_TIMEOUT_SECONDS: u64 = 600;

/// Fully resolved client settings: file values first, command-line overrides on top.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub concurrent_requests: usize,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HashMap::new(),
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
            verbose: false,
            json_logs: false,
        }
    }
}

impl ClientSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            base_url: config.server.base_url.clone(),
            timeout: config.server.timeout_seconds.map(Duration::from_secs),
            user_agent: config
                .server
                .user_agent
                .clone()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            headers: config.server.headers.clone(),
            concurrent_requests: config
                .concurrent_requests()
                .unwrap_or(DEFAULT_CONCURRENT_REQUESTS),
            verbose: config.verbose(),
            json_logs: config.json_logs(),
        }
    }
}

impl ClientSettings {
    /// Loggable one-line view. Header values may hold credentials, so only
    /// their names are shown.
    pub fn redacted(&self) -> String {
        let mut header_names: Vec<&str> = self.headers.keys().map(String::as_str).collect();
        header_names.sort_unstable();
        format!(
            "base_url={} timeout={:?} concurrent_requests={} user_agent={} headers=[{}]",
            self.base_url,
            self.timeout,
            self.concurrent_requests,
            self.user_agent,
            header_names.join(", ")
        )
    }
}

impl ConfigProvider for ClientSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validate_non_empty_string("user_agent", &self.user_agent)?;
        if let Some(timeout) = self.timeout {
            validate_range("timeout_seconds", timeout.as_secs(), 1, MAX_TIMEOUT_SECONDS)?;
        }
        Ok(())
    }
}

//! Configuration file handling

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// HTTP transport settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Scenario runner settings
    #[serde(default)]
    pub runner: RunnerConfig,
}

/// HTTP transport settings
#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout, covering connect and body read
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("test-it/{}", env!("CARGO_PKG_VERSION"))
}

/// Scenario runner settings
#[derive(Debug, Deserialize)]
pub struct RunnerConfig {
    /// Run the scenarios of one file concurrently
    #[serde(default = "default_parallel")]
    pub parallel_scenarios: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            parallel_scenarios: default_parallel(),
        }
    }
}

fn default_parallel() -> bool {
    true
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        if config.http.timeout_secs == 0 {
            return Err(super::Error::Config(
                "http.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(config)
    }
}

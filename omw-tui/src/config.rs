use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OmwConfig {
    /// Base URL of the omw server, e.g. "http://localhost:31337/omw/"
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Seconds before an in-flight request gives up
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Default tracing filter, overridden by RUST_LOG
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://localhost:31337/omw/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for OmwConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

impl OmwConfig {
    pub fn root_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("omw-tui"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::root_path()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::root_path()?.join("omw-tui.log"))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

//! devicelist configuration management
//! Handles loading and saving the config file

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// devicelist configuration. Credentials are never stored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Account service settings
    #[serde(default)]
    pub service: ServiceConfig,
}

/// Account service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Whole-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

fn default_user_agent() -> String {
    format!("devicelist/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load config from the default location or specified path
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = Self::config_path(path)?;

        if !config_path.exists() {
            info!(
                "Config file not found, creating default at {:?}",
                config_path
            );
            let config = Config::default();
            config.save(path)?;
            return Ok(config);
        }

        let raw = fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&raw).context("Failed to parse config file")?;

        debug!("Loaded config from {:?}", config_path);
        Ok(config)
    }

    /// Save config to the default location or specified path
    pub fn save(&self, path: Option<&str>) -> Result<()> {
        let config_path = Self::config_path(path)?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(&self)?;
        fs::write(&config_path, content).context("Failed to write config file")?;

        info!("Saved config to {:?}", config_path);
        Ok(())
    }

    /// Get the config file path
    fn config_path(path: Option<&str>) -> Result<PathBuf> {
        // Env override wins over the command line
        if let Ok(env_path) = std::env::var("DEVICELIST_CONFIG") {
            return Ok(PathBuf::from(env_path));
        }

        if let Some(p) = path {
            return Ok(PathBuf::from(p));
        }

        let home = dirs::home_dir().context("Cannot find home directory")?;
        Ok(home.join(".devicelist").join("config.yml"))
    }

    /// Replace the service URL, e.g. from `--service-url`
    pub fn with_service_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.service.base_url = url;
        }
        self
    }
}

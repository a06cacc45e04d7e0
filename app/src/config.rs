//! Application configuration loaded from an optional TOML file.
//!
//! Missing keys fall back to the defaults; nothing is validated here.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use todo_core::{ClientConfig, DEFAULT_BASE_URL};

pub const DEFAULT_MOUNT: &str = "#app";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Collection URL of the todo service.
    pub api_url: String,
    pub with_credentials: bool,
    /// Mount point the application attaches to.
    pub mount: String,
    /// How long a fetched list counts as fresh. 0 refetches every time.
    pub stale_time_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            with_credentials: true,
            mount: DEFAULT_MOUNT.to_string(),
            stale_time_secs: 0,
        }
    }
}

impl AppConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api_url).with_credentials(self.with_credentials)
    }

    pub fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_secs)
    }
}

/// Read and parse the TOML file at `path`.
pub fn load_config(path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

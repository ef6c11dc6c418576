//! CLI configuration management.
//!
//! Stored as TOML at `~/.ballot/config.toml`; flags and environment
//! variables take precedence.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default RPC endpoint
    pub rpc_url: String,
    /// Chain ID to sign for; asked from the node when unset
    pub chain_id: Option<u64>,
    /// How long `deploy` waits for its receipt
    pub confirm_timeout_secs: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: None,
            confirm_timeout_secs: 30,
        }
    }
}

impl CliConfig {
    /// Load configuration from the default location, or defaults if absent.
    pub fn load() -> anyhow::Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Invalid config '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".ballot").join("config.toml"))
    }

    /// Set a value by key as given on the command line.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "rpc_url" => self.rpc_url = value.to_string(),
            "chain_id" => {
                self.chain_id = if value == "auto" { None } else { Some(value.parse()?) }
            }
            "confirm_timeout_secs" => self.confirm_timeout_secs = value.parse()?,
            other => anyhow::bail!("Unknown config key: {}", other),
        }
        Ok(())
    }
}

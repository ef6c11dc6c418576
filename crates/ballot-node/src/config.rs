//! Node configuration.
//!
//! Loaded from a TOML file, then overridden by command-line flags.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use ballot_rpc::RpcServerConfig;

/// Node configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// RPC configuration
    pub rpc: RpcConfig,
    /// Ledger host configuration
    pub host: HostConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl NodeConfig {
    /// Load configuration from file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: NodeConfig = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        Ok(config)
    }

    /// Save configuration to file.
    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write config file '{}': {}", path.display(), e))?;
        Ok(())
    }

    /// Validate configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rpc.http_addr.port() == 0 {
            anyhow::bail!("RPC HTTP port cannot be 0");
        }
        if self.host.chain_id == 0 {
            anyhow::bail!("Chain ID cannot be 0");
        }
        if self.rpc.max_body_size == 0 {
            anyhow::bail!("RPC max body size cannot be 0");
        }
        Ok(())
    }

    pub fn rpc_server_config(&self) -> RpcServerConfig {
        RpcServerConfig {
            http_addr: self.rpc.http_addr,
            cors: self.rpc.cors,
            max_body_size: self.rpc.max_body_size,
        }
    }
}

/// RPC configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    /// HTTP RPC address
    pub http_addr: SocketAddr,
    /// Enable CORS
    pub cors: bool,
    /// Maximum request body size (bytes)
    pub max_body_size: u32,
}

impl Default for RpcConfig {
    fn default() -> Self {
        let defaults = RpcServerConfig::default();
        Self {
            http_addr: defaults.http_addr,
            cors: defaults.cors,
            max_body_size: defaults.max_body_size,
        }
    }
}

/// Ledger host configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Chain ID signed into every transaction
    pub chain_id: u64,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { chain_id: 1337 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level or `EnvFilter` directives
    pub level: String,
    /// Emit JSON lines instead of pretty output
    pub json: bool,
    /// Log to file
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = NodeConfig::default();
        assert_eq!(config.host.chain_id, 1337);
        assert_eq!(config.rpc.http_addr.port(), 8545);
        assert!(config.rpc.cors);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = NodeConfig::default();
        config.rpc.http_addr.set_port(0);
        assert!(config.validate().is_err());

        let mut config = NodeConfig::default();
        config.host.chain_id = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[host]\nchain_id = 42\n\n[logging]\njson = true").unwrap();

        let config = NodeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.host.chain_id, 42);
        assert!(config.logging.json);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.rpc.http_addr.port(), 8545);
    }

    #[test]
    fn test_config_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("node.toml");

        let mut config = NodeConfig::default();
        config.host.chain_id = 7;
        config.rpc.cors = false;
        config.logging.file = Some(PathBuf::from("node.log"));
        config.to_file(&path).unwrap();

        let loaded = NodeConfig::from_file(&path).unwrap();
        assert_eq!(loaded.host.chain_id, 7);
        assert!(!loaded.rpc.cors);
        assert_eq!(loaded.logging.file, Some(PathBuf::from("node.log")));
    }

    #[test]
    fn test_missing_file() {
        let err = NodeConfig::from_file(Path::new("/nonexistent/ballot-node.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_rpc_server_config() {
        let mut config = NodeConfig::default();
        config.rpc.max_body_size = 4096;
        let rpc = config.rpc_server_config();
        assert_eq!(rpc.max_body_size, 4096);
        assert_eq!(rpc.http_addr, config.rpc.http_addr);
    }
}

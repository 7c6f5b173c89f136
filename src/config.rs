use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::PortalError;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub contract: ContractConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory served for the front-end page and its assets
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct WalletConfig {
    /// JSON-RPC endpoint of the wallet / node
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// How often the console polls for account changes and receipts
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// The badge contract targeted by the mint action
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ContractConfig {
    #[serde(default)]
    pub address: Address,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_static_dir() -> String {
    ".".to_string()
}

fn default_rpc_url() -> String {
    "http://127.0.0.1:8545".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_token_uri() -> String {
    "ipfs://bafkreih2y7h2z4lpj4bdg3i4g5v5l3p6z5qj3d7y2w6f4z6c4x5e6a7b8i".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: Address::ZERO,
            token_uri: default_token_uri(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            wallet: WalletConfig::default(),
            contract: ContractConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_toml(s: &str) -> Result<Self, PortalError> {
        let config: Self = toml::from_str(s).map_err(|e| PortalError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), PortalError> {
        if self.wallet.poll_interval_ms == 0 {
            return Err(PortalError::Config(
                "wallet.poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Load the config file, falling back to defaults when it is absent or broken.
    pub fn load_or_default(path: &str) -> Self {
        if !std::path::Path::new(path).exists() {
            info!("Config file not found at '{}'. Using defaults.", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(s) => match Self::from_toml(&s) {
                Ok(c) => {
                    info!("Config loaded from {}", path);
                    c
                }
                Err(e) => {
                    warn!("Error parsing config: {}. Using defaults.", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Error reading config: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Apply the `PORT` environment variable on top of the file settings.
    pub fn with_env(self) -> Self {
        self.with_port_var(std::env::var("PORT").ok())
    }

    fn with_port_var(mut self, port: Option<String>) -> Self {
        if let Some(raw) = port {
            match raw.trim().parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Ignoring invalid PORT value '{}'", raw),
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.static_dir, ".");
        assert_eq!(config.contract.address, Address::ZERO);
        assert!(config.contract.token_uri.starts_with("ipfs://"));
    }

    #[test]
    fn test_partial_toml() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 8080

            [contract]
            address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.static_dir, ".");
        assert_eq!(
            config.contract.address.to_checksum(None),
            "0x5FbDB2315678afecb367f032d93F642f64180aa3"
        );
        assert_eq!(config.wallet, WalletConfig::default());
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            AppConfig::from_toml("[server]\nport = \"nope\""),
            Err(PortalError::Config(_))
        ));
    }

    #[test]
    fn test_zero_poll_interval_rejected() {
        let result = AppConfig::from_toml("[wallet]\npoll_interval_ms = 0");
        assert!(matches!(result, Err(PortalError::Config(msg)) if msg.contains("poll_interval_ms")));

        let config = AppConfig::from_toml("[wallet]\npoll_interval_ms = 1").unwrap();
        assert_eq!(config.wallet.poll_interval_ms, 1);
    }

    #[test]
    fn test_port_override() {
        let config = AppConfig::default().with_port_var(Some("4100".to_string()));
        assert_eq!(config.server.port, 4100);

        let config = AppConfig::default().with_port_var(Some("not-a-port".to_string()));
        assert_eq!(config.server.port, DEFAULT_PORT);

        let config = AppConfig::default().with_port_var(None);
        assert_eq!(config.server.port, DEFAULT_PORT);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_or_default("/nonexistent/badge-portal.toml");
        assert_eq!(config, AppConfig::default());
    }
}

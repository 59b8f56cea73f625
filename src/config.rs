//! Configuration loading for linkup-mcp
//!
//! Configuration is loaded from:
//! 1. Environment variables LINKUP_API_KEY / LINKUP_API_URL
//! 2. Environment variable LINKUP_MCP_CONFIG_PATH
//! 3. ~/.linkup-mcp/config.toml
//! 4. Default values
//!
//! The credential is carried inside the `Config` value and handed to the
//! search client explicitly; nothing reads the environment after load time.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Linkup API settings
    #[serde(default)]
    pub linkup: LinkupConfig,
    /// Local development server settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Linkup API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkupConfig {
    /// API credential; absent means searches fail with a configuration error
    #[serde(default)]
    pub api_key: Option<String>,
    /// Search endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port for the local development HTTP server
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_endpoint() -> String {
    "https://api.linkup.so/v1/search".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            linkup: LinkupConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for LinkupConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_path();

        let mut config = if let Some(path) = config_path {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(&path)?;
                toml::from_str(&content)?
            } else {
                tracing::debug!("Config file not found, using defaults");
                Self::default()
            }
        } else {
            tracing::debug!("No config path specified, using defaults");
            Self::default()
        };

        // Environment variables take priority over the file
        if let Ok(key) = std::env::var("LINKUP_API_KEY") {
            if !key.is_empty() {
                config.linkup.api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("LINKUP_API_URL") {
            if !url.is_empty() {
                config.linkup.endpoint = url;
            }
        }

        Ok(config)
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        // 1. Check environment variable
        if let Ok(path) = std::env::var("LINKUP_MCP_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        // 2. Check ~/.linkup-mcp/config.toml
        if let Ok(home) = std::env::var("HOME") {
            let path = PathBuf::from(home).join(".linkup-mcp").join("config.toml");
            return Some(path);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.linkup.endpoint, "https://api.linkup.so/v1/search");
        assert!(config.linkup.api_key.is_none());
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [linkup]
            api_key = "lk-test"
            "#,
        )
        .unwrap();
        assert_eq!(config.linkup.api_key.as_deref(), Some("lk-test"));
        assert_eq!(config.linkup.endpoint, "https://api.linkup.so/v1/search");
        assert_eq!(config.server.port, 3000);
    }
}

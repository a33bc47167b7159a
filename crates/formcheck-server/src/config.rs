// File: src/config.rs
// Purpose: Configuration parsing from formcheck.toml with environment overrides

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub assets: AssetsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Static assets configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding the wasm-pack output, served at /pkg
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

// Default values
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> String {
    "crates/formcheck-wasm/pkg".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./formcheck.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("formcheck.toml")
    }

    /// Apply `FORMCHECK_HOST` / `FORMCHECK_PORT` from the process environment
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(host) = lookup("FORMCHECK_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("FORMCHECK_PORT") {
            self.server.port = port
                .parse()
                .with_context(|| format!("Invalid FORMCHECK_PORT: {:?}", port))?;
        }
        Ok(self)
    }

    /// Socket address to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.addr(), "127.0.0.1:3000");
        assert_eq!(config.assets.static_dir, "crates/formcheck-wasm/pkg");
    }

    #[test]
    fn test_partial_config() {
        let toml = r#"
            [server]
            port = 8080

            [assets]
            static_dir = "public/pkg"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.assets.static_dir, "public/pkg");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load("does/not/exist/formcheck.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::default()
            .with_overrides(|key| match key {
                "FORMCHECK_HOST" => Some("0.0.0.0".to_string()),
                "FORMCHECK_PORT" => Some("9000".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_port_override() {
        let result = Config::default().with_overrides(|key| {
            (key == "FORMCHECK_PORT").then(|| "http".to_string())
        });
        assert!(result.is_err());
    }
}

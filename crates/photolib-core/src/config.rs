//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/photolib/config.toml)
//! 3. Environment variables (PHOTOLIB_* prefix)
//!
//! Environment variables take precedence over config file values. AWS
//! credentials themselves come from the standard SDK chain (environment,
//! shared profile); they are never stored in this file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "PHOTOLIB";

/// Key prefix all managed objects live under
pub const DEFAULT_PREFIX: &str = "people/";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bucket holding the photo library
    #[serde(default)]
    pub bucket: String,

    /// AWS region of the bucket
    #[serde(default = "default_region")]
    pub region: String,

    /// Key prefix for managed objects
    #[serde(default = "default_key_prefix")]
    pub prefix: String,

    /// Custom endpoint (MinIO-style deployments); None for AWS proper
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            prefix: default_key_prefix(),
            endpoint_url: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (PHOTOLIB_BUCKET, PHOTOLIB_REGION,
    ///    PHOTOLIB_PREFIX, PHOTOLIB_ENDPOINT_URL)
    /// 2. Config file (~/.config/photolib/config.toml or PHOTOLIB_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(format!("{}_BUCKET", ENV_PREFIX)) {
            self.bucket = val;
        }

        if let Ok(val) = std::env::var(format!("{}_REGION", ENV_PREFIX)) {
            self.region = val;
        }

        if let Ok(val) = std::env::var(format!("{}_PREFIX", ENV_PREFIX)) {
            if !val.is_empty() {
                self.prefix = val;
            }
        }

        if let Ok(val) = std::env::var(format!("{}_ENDPOINT_URL", ENV_PREFIX)) {
            self.endpoint_url = if val.is_empty() { None } else { Some(val) };
        }
    }

    /// Check that the configuration names a bucket and region
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            anyhow::bail!(
                "No bucket configured. Set `bucket` in {:?} or PHOTOLIB_BUCKET.",
                Self::config_file_path()
            );
        }
        if self.region.is_empty() {
            anyhow::bail!("No region configured.");
        }
        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_file_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with PHOTOLIB_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("photolib")
            .join("config.toml")
    }
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_key_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

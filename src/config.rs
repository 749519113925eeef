//! Tool configuration.
//!
//! An optional `respimg.toml` in the target directory supplies defaults for
//! the `variants` command; CLI flags override it. All fields are optional:
//!
//! ```toml
//! prefix = "infra"
//! sizes = [480, 800, 1200]
//! quality = 80
//! ```
//!
//! An absent file yields the built-in defaults. A file that exists but does
//! not parse or validate is fatal: an explicit config that fails to load
//! should stop the run, not silently degrade. Unknown keys are rejected to
//! catch typos early.

use crate::sizes::DEFAULT_SIZES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the target directory.
pub const CONFIG_FILENAME: &str = "respimg.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Defaults for the variant pipeline, overridable per directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolConfig {
    /// Base-name prefix of source images (`infra` matches `infra1.jpg`).
    pub prefix: String,
    /// Target widths to generate.
    pub sizes: Vec<u32>,
    /// WebP quality (0-100).
    pub quality: u32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            prefix: "infra".to_string(),
            sizes: DEFAULT_SIZES.to_vec(),
            quality: 80,
        }
    }
}

impl ToolConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quality > 100 {
            return Err(ConfigError::Validation("quality must be 0-100".into()));
        }
        if self.sizes.is_empty() {
            return Err(ConfigError::Validation("sizes must not be empty".into()));
        }
        if self.sizes.contains(&0) {
            return Err(ConfigError::Validation("sizes must be positive".into()));
        }
        if self.prefix.is_empty() || !self.prefix.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ConfigError::Validation(
                "prefix must be non-empty and alphabetic".into(),
            ));
        }
        Ok(())
    }
}

/// Load `respimg.toml` from `dir`, falling back to defaults when absent.
pub fn load(dir: &Path) -> Result<ToolConfig, ConfigError> {
    let path = dir.join(CONFIG_FILENAME);
    if !path.exists() {
        return Ok(ToolConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    let config: ToolConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

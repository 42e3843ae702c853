//! Application configuration for simblog
//!
//! Configuration lives in a TOML file; every field has a default, so a
//! partial or missing file is valid.

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::{Result, SimblogError};

pub use types::{AppConfig, DatabaseConfig, RelatedConfig, SiteConfig};

impl AppConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SimblogError::Other(format!("failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.related.limit == 0 {
            crate::bail_invalid!("related.limit", "0 (must be at least 1)");
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::recommend::{RecommendOptions, DEFAULT_LIMIT};

/// Application configuration, stored as TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub site: SiteConfig,
    pub related: RelatedConfig,
    pub database: DatabaseConfig,
}

/// Site metadata substituted into document placeholders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    /// Base URL for canonical links, e.g. `https://example.com`
    pub base_url: String,
    pub author: String,
    pub author_bio: String,
    pub logo: String,
    pub featured_image: String,
    /// Call-to-action block appended to new documents; empty disables it
    pub cta_html: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "simblog".to_string(),
            base_url: String::new(),
            author: String::new(),
            author_bio: String::new(),
            logo: String::new(),
            featured_image: String::new(),
            cta_html: String::new(),
        }
    }
}

/// Related-content settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedConfig {
    /// Maximum number of related documents per request
    pub limit: usize,
    /// Storage time budget per request in milliseconds; 0 disables it
    pub timeout_ms: u64,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            timeout_ms: 5000,
        }
    }
}

impl RelatedConfig {
    pub fn options(&self) -> RecommendOptions {
        RecommendOptions {
            limit: self.limit,
            timeout: (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms)),
        }
    }
}

/// Storage adapter settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// How long a statement waits on a locked database, in milliseconds
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5000,
        }
    }
}

impl DatabaseConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

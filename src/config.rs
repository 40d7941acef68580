//! Configuration file parser for ~/.config/newsdeck/config.toml.
//!
//! The config file is optional — a missing or empty file yields
//! `Config::default()`, whose tabs mirror the upstream pipeline's standard
//! output files. Unknown keys are ignored by serde.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::present::FallbackStyle;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0} bytes (max {MAX_FILE_SIZE})")]
    TooLarge(u64),
}

/// Maximum config file size (1 MB).
const MAX_FILE_SIZE: u64 = 1_048_576;

/// One navigable tab: an id, a display label, and the feed file it loads.
#[derive(Debug, Clone, Deserialize)]
pub struct TabConfig {
    pub id: String,
    pub label: String,
    pub feed: String,
}

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified; missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the per-tab feed files are served under.
    pub feed_base_url: String,

    /// Tab that gets the date-themed header.
    pub main_tab: String,

    /// Articles revealed per "load more" step.
    pub page_size: usize,

    /// Minutes a fetched feed stays fresh in the cache.
    pub cache_ttl_minutes: u64,

    /// Fallback visual strategy for imageless articles.
    pub fallback_style: FallbackStyle,

    /// Navigable tabs, in display order.
    pub tabs: Vec<TabConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_base_url: "http://127.0.0.1:8080/data".to_string(),
            main_tab: "main".to_string(),
            page_size: crate::pagination::PAGE_SIZE,
            cache_ttl_minutes: 15,
            fallback_style: FallbackStyle::default(),
            tabs: vec![
                TabConfig {
                    id: "main".into(),
                    label: "Today".into(),
                    feed: "main-feed.json".into(),
                },
                TabConfig {
                    id: "adobe".into(),
                    label: "Adobe".into(),
                    feed: "vendor-adobe.json".into(),
                },
                TabConfig {
                    id: "salesforce".into(),
                    label: "Salesforce".into(),
                    feed: "vendor-salesforce.json".into(),
                },
            ],
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line info
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(meta.len()));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            tabs = config.tabs.len(),
            base = %config.feed_base_url,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Feed path configured for a tab id, if any.
    pub fn feed_for_tab(&self, tab_id: &str) -> Option<&str> {
        self.tabs
            .iter()
            .find(|t| t.id == tab_id)
            .map(|t| t.feed.as_str())
    }

    /// Cache TTL as a `Duration`.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_minutes * 60)
    }
}

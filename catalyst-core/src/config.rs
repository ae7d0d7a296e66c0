//! TOML configuration: where data comes from and how clicks are matched.
//!
//! ```toml
//! [feed]
//! base_url = "http://127.0.0.1:5000"
//! timeout_secs = 30
//! max_retries = 2
//!
//! [sources]
//! prices = "feed"      # feed | yahoo | files
//! articles = "feed"    # feed | files
//! data_dir = "data"
//!
//! [yahoo]
//! range = "1y"
//!
//! [selection]
//! tolerance_ms = 86400000
//! ```
//!
//! Every section and field is optional; missing values take the defaults above.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::catalyst::DEFAULT_TOLERANCE_MS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalystConfig {
    pub feed: FeedConfig,
    pub sources: SourcesConfig,
    pub yahoo: YahooConfig,
    pub selection: SelectionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSourceKind {
    Feed,
    Yahoo,
    Files,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleSourceKind {
    Feed,
    Files,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub prices: PriceSourceKind,
    pub articles: ArticleSourceKind,
    pub data_dir: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            prices: PriceSourceKind::Feed,
            articles: ArticleSourceKind::Feed,
            data_dir: PathBuf::from("data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YahooConfig {
    /// Lookback range passed to the chart API (`1y`, `6mo`, `5y`, ...).
    pub range: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            range: "1y".into(),
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// A click selects a catalyst day strictly closer than this.
    pub tolerance_ms: u64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            tolerance_ms: DEFAULT_TOLERANCE_MS,
        }
    }
}

impl CatalystConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.selection.tolerance_ms == 0 {
            return Err(ConfigError::Invalid(
                "selection.tolerance_ms must be greater than zero".into(),
            ));
        }
        if self.feed.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("feed.base_url must not be empty".into()));
        }
        if self.feed.timeout_secs == 0 || self.yahoo.timeout_secs == 0 {
            return Err(ConfigError::Invalid("timeouts must be at least one second".into()));
        }
        if self.yahoo.range.trim().is_empty() {
            return Err(ConfigError::Invalid("yahoo.range must not be empty".into()));
        }
        Ok(())
    }
}

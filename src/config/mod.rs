//! Runtime configuration
//!
//! Every field has a default, so an empty or partial YAML file is valid.
//! Lookup order: an explicit path, then `<config_dir>/bookgraph/config.yaml`
//! if it exists, then the built-in defaults.

pub mod defaults;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogSettings,
    pub tags: TagSettings,
    pub related: RelatedSettings,
    pub pacing: PacingSettings,
}

/// Catalog HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub base_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: "https://openlibrary.org".to_string(),
            timeout_secs: 30,
            user_agent: format!("bookgraph/{} (theme similarity graph)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl CatalogSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Tag resolution settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagSettings {
    /// Upper bound on the resolved tag set (K)
    pub max_tags: usize,
    /// Minimum best-match similarity against the theme vocabulary
    pub semantic_threshold: f32,
    pub region_keywords: Vec<String>,
    pub blocklist: Vec<String>,
    pub theme_vocabulary: Vec<String>,
}

impl Default for TagSettings {
    fn default() -> Self {
        Self {
            max_tags: 5,
            semantic_threshold: 0.50,
            region_keywords: to_strings(defaults::REGION_KEYWORDS),
            blocklist: to_strings(defaults::BLOCKLIST),
            theme_vocabulary: to_strings(defaults::THEME_VOCABULARY),
        }
    }
}

/// Related-work search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelatedSettings {
    /// Related books kept per tag
    pub max_results: usize,
    /// Extra candidates requested per search to absorb filtering loss
    pub overfetch: usize,
}

impl Default for RelatedSettings {
    fn default() -> Self {
        Self {
            max_results: 3,
            overfetch: 12,
        }
    }
}

/// Courtesy pacing between catalog round-trips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingSettings {
    pub pause_ms: u64,
}

impl Default for PacingSettings {
    fn default() -> Self {
        Self { pause_ms: 500 }
    }
}

impl PacingSettings {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

impl Config {
    /// Parse configuration from YAML text and validate it.
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        // An empty document deserializes as null, not as an empty mapping
        let config: Config = if text.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Load from `explicit` if given, else from the default location if a
    /// file exists there, else return the defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Default config file location (`<config_dir>/bookgraph/config.yaml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bookgraph").join("config.yaml"))
    }

    /// Render the configuration as YAML.
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.tags.max_tags == 0 {
            return Err(ConfigError::Invalid("tags.max_tags must be at least 1".into()));
        }
        if !(-1.0..=1.0).contains(&self.tags.semantic_threshold) {
            return Err(ConfigError::Invalid(format!(
                "tags.semantic_threshold must be within [-1, 1], got {}",
                self.tags.semantic_threshold
            )));
        }
        if self.related.max_results == 0 {
            return Err(ConfigError::Invalid("related.max_results must be at least 1".into()));
        }
        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::Invalid("catalog.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

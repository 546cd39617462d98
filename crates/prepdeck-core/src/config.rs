//! Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Main configuration structure for Prepdeck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Knowledge-base settings.
    #[serde(default)]
    pub site: SiteConfig,

    /// Search settings.
    #[serde(default)]
    pub search: SearchConfig,

    /// Persisted navigation state settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Knowledge-base configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Title shown in the CLI header.
    #[serde(default = "default_title")]
    pub title: String,

    /// Directory holding the markdown corpus.
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Whether documents marked `draft` are loaded.
    #[serde(default)]
    pub include_drafts: bool,
}

/// Search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Quiet period before a typed query is run, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of results returned; 0 means unlimited.
    #[serde(default)]
    pub max_results: usize,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding persisted key-value state.
    #[serde(default = "default_state_file")]
    pub state_file: PathBuf,

    /// Key under which the selected document id is stored.
    #[serde(default = "default_selected_key")]
    pub selected_key: String,
}

fn default_title() -> String {
    "Prepdeck".to_string()
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_state_file() -> PathBuf {
    PathBuf::from(".prepdeck/state.json")
}

fn default_selected_key() -> String {
    "selectedDocumentId".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            content_dir: default_content_dir(),
            include_drafts: false,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            max_results: 0,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_file: default_state_file(),
            selected_key: default_selected_key(),
        }
    }
}

impl SearchConfig {
    /// Result limit as an option, `None` meaning unlimited.
    pub fn limit(&self) -> Option<usize> {
        (self.max_results > 0).then_some(self.max_results)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config(format!("Failed to parse {}: {}", path.display(), e.message()))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration layered with `PREPDECK__*` environment overrides.
    ///
    /// A missing file is not an error here; defaults plus environment apply.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix("PREPDECK").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.trim().is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.storage.selected_key.trim().is_empty() {
            return Err(CoreError::config("storage.selected_key cannot be empty"));
        }

        if self.search.debounce_ms > 5_000 {
            tracing::warn!(
                debounce_ms = self.search.debounce_ms,
                "search.debounce_ms is unusually long"
            );
        }

        Ok(())
    }
}

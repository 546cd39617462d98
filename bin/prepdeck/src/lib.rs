//! Prepdeck CLI Library
//!
//! Command implementations for the `prepdeck` binary, exposed as a library so
//! they can be exercised from integration tests.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (tree, search, show, select, restore, check, index, interactive)
//! - [`render`] - Markdown to HTML hand-off and sidebar tree rendering

pub mod cmd;
pub mod render;

use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
pub use prepdeck_core::{Config, DocumentStore};
use prepdeck_core::ContentLoader;
use prepdeck_nav::{JsonFileStore, Navigator};
use prepdeck_search::SearchService;

/// Command-line overrides applied on top of the configuration file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Content directory instead of `site.content_dir`.
    pub content_dir: Option<PathBuf>,

    /// State file instead of `storage.state_file`.
    pub state_file: Option<PathBuf>,
}

/// Loaded configuration and document tree shared by every command.
#[derive(Debug)]
pub struct App {
    /// Effective configuration.
    pub config: Config,

    /// The document tree, loaded once.
    pub store: DocumentStore,
}

impl App {
    /// Load configuration (file plus `PREPDECK__*` environment) and content.
    pub fn load(config_path: &Path, overrides: &Overrides) -> Result<Self> {
        let mut config = Config::load_with_env(config_path)
            .wrap_err_with(|| format!("Failed to load configuration from {}", config_path.display()))?;

        if let Some(dir) = &overrides.content_dir {
            config.site.content_dir = dir.clone();
        }
        if let Some(file) = &overrides.state_file {
            config.storage.state_file = file.clone();
        }

        let store = ContentLoader::new(&config.site.content_dir)
            .with_drafts(config.site.include_drafts)
            .load()
            .wrap_err("Failed to load content")?;

        Ok(Self { config, store })
    }

    /// Build an app from an in-memory store (tests, embedding).
    pub fn from_parts(config: Config, store: DocumentStore) -> Self {
        Self { config, store }
    }

    /// Build the search service for the loaded store.
    pub fn search_service(&self) -> SearchService {
        SearchService::new(&self.store).with_limit(self.config.search.limit())
    }

    /// Navigator persisting into the configured state file.
    pub fn navigator(&self) -> Navigator<'_, JsonFileStore> {
        Navigator::new(
            &self.store,
            JsonFileStore::new(&self.config.storage.state_file),
        )
        .with_key(self.config.storage.selected_key.clone())
    }
}

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

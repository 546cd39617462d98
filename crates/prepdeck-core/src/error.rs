//! Error types for the Prepdeck core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for Prepdeck.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration file missing, unparsable, or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Frontmatter parsing error.
    #[error("Frontmatter error in {path}: {message}")]
    Frontmatter { path: PathBuf, message: String },

    /// Content directory could not be turned into a document tree.
    #[error("Load error in {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error for exported stores.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Layered file and environment configuration could not be resolved.
    #[error("Config layering error: {0}")]
    Layered(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new frontmatter error.
    pub fn frontmatter(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Frontmatter {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new load error.
    pub fn load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: message.into(),
        }
    }
}

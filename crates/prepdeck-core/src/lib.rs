//! Prepdeck Core Library
//!
//! Document tree, configuration, content loading, and error handling for the
//! Prepdeck knowledge base.

pub mod config;
pub mod content;
pub mod error;
pub mod frontmatter;
pub mod loader;

pub use config::Config;
pub use content::{
    Category, CategoryContent, Document, DocumentStore, Documents, Section, StoreIssue, StoreStats,
};
pub use error::{CoreError, Result};
pub use frontmatter::Frontmatter;
pub use loader::ContentLoader;

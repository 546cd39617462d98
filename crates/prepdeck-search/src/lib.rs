//! Prepdeck Search Library
//!
//! In-memory word index and query matching over the document tree.
//!
//! # Features
//!
//! - **Word index**: titles and bodies split into lowercase words, built once
//! - **Substring matching**: a query word matches any word containing it
//! - **Title precedence**: title matches sort before content-only matches
//! - **Debouncing**: a Tokio-driven driver that only runs the settled query
//!
//! # Example
//!
//! ```
//! use prepdeck_core::{Category, Document, DocumentStore, Section};
//! use prepdeck_search::SearchService;
//!
//! let store = DocumentStore::new(vec![Section::new(
//!     "frontend",
//!     "Frontend",
//!     vec![Category::single(
//!         "hooks",
//!         "Hooks",
//!         Document::new("react-hooks", "React Hooks", "useState"),
//!     )],
//! )]);
//!
//! let service = SearchService::new(&store);
//! assert_eq!(service.search("hoo")[0].id, "react-hooks");
//! ```

pub mod debounce;
pub mod index;
pub mod query;
pub mod service;

pub use debounce::{DEFAULT_DEBOUNCE, DebouncedSearch, SearchResults};
pub use index::{MAX_EXPORT_SIZE, SearchIndex, SearchIndexEntry};
pub use query::{MatchKind, SearchHit, SearchQuery, search, search_hits};
pub use service::SearchService;
use thiserror::Error;

/// Search-related errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

//! Prepdeck Navigation Library
//!
//! Tracks the selected document and the expanded sidebar categories, and
//! persists the selection through a [`KeyValueStore`].
//!
//! # Example
//!
//! ```
//! use prepdeck_core::{Category, Document, DocumentStore, Section};
//! use prepdeck_nav::{MemoryStore, Navigator};
//!
//! let store = DocumentStore::new(vec![Section::new(
//!     "backend",
//!     "Backend",
//!     vec![Category::list(
//!         "node",
//!         "Node",
//!         vec![Document::new("event-loop", "Event Loop", "phases")],
//!     )],
//! )]);
//!
//! let mut nav = Navigator::new(&store, MemoryStore::new());
//! let first = nav.restore_from_persisted().unwrap();
//! assert_eq!(first.id, "event-loop");
//! ```

pub mod navigator;
pub mod storage;

pub use navigator::{DEFAULT_SELECTED_KEY, Navigator, SelectionState};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};

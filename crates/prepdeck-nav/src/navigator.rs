//! Selected document and expanded sidebar categories.

use std::collections::BTreeSet;

use prepdeck_core::{Document, DocumentStore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::storage::KeyValueStore;

/// Storage key for the selected document id.
pub const DEFAULT_SELECTED_KEY: &str = "selectedDocumentId";

/// Current navigation state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Id of the selected document.
    pub selected_document_id: Option<String>,

    /// Ids of the expanded categories.
    pub expanded_category_ids: BTreeSet<String>,
}

/// Navigation over a document store, persisting the selection through `S`.
///
/// Storage failures never reach the caller: they are logged at `warn` and
/// the in-memory state stays authoritative.
#[derive(Debug)]
pub struct Navigator<'a, S> {
    store: &'a DocumentStore,
    storage: S,
    key: String,
    state: SelectionState,
}

impl<'a, S: KeyValueStore> Navigator<'a, S> {
    /// Navigator with nothing selected or expanded.
    pub fn new(store: &'a DocumentStore, storage: S) -> Self {
        Self {
            store,
            storage,
            key: DEFAULT_SELECTED_KEY.to_string(),
            state: SelectionState::default(),
        }
    }

    /// Use a different storage key for the selection.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Restore the selection saved by a previous session.
    ///
    /// When the stored id resolves, it is selected and its ancestor categories
    /// become the expanded set. Otherwise the first document is selected and
    /// nothing is expanded.
    pub fn restore_from_persisted(&mut self) -> Option<&'a Document> {
        let persisted = match self.storage.load(&self.key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read persisted selection");
                None
            }
        };

        self.state.expanded_category_ids.clear();

        let store = self.store;
        let restored = persisted.as_deref().and_then(|id| {
            let doc = store.find_document(id)?;
            let path = store.expansion_path(id).unwrap_or_default();
            Some((doc, path))
        });

        let selected = match restored {
            Some((doc, path)) => {
                debug!(id = %doc.id, expanded = path.len(), "restored selection");
                self.state.expanded_category_ids.extend(path);
                Some(doc)
            }
            None => {
                if let Some(id) = &persisted {
                    debug!(id = %id, "persisted selection no longer exists, using first document");
                }
                store.first_document()
            }
        };

        self.state.selected_document_id = selected.map(|doc| doc.id.clone());
        selected
    }

    /// Select `doc` and write its id through to storage.
    pub fn select_document(&mut self, doc: &Document) {
        self.state.selected_document_id = Some(doc.id.clone());
        if let Err(e) = self.storage.save(&self.key, &doc.id) {
            warn!(id = %doc.id, error = %e, "failed to persist selection");
        }
    }

    /// Select by id. Returns `false` when the store has no such document.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        match self.store.find_document(id) {
            Some(doc) => {
                self.select_document(doc);
                true
            }
            None => false,
        }
    }

    /// Flip the expansion of a category. Returns whether it is now expanded.
    pub fn toggle_category(&mut self, id: &str) -> bool {
        if self.state.expanded_category_ids.remove(id) {
            false
        } else {
            self.state.expanded_category_ids.insert(id.to_string());
            true
        }
    }

    /// Expand every ancestor of a document, e.g. when opening a search hit.
    ///
    /// Returns `false` if no category holds the document.
    pub fn expand_path_to(&mut self, document_id: &str) -> bool {
        match self.store.expansion_path(document_id) {
            Some(path) => {
                self.state.expanded_category_ids.extend(path);
                true
            }
            None => false,
        }
    }

    /// Collapse every category.
    pub fn collapse_all(&mut self) {
        self.state.expanded_category_ids.clear();
    }

    /// Whether a category is expanded.
    pub fn is_expanded(&self, id: &str) -> bool {
        self.state.expanded_category_ids.contains(id)
    }

    /// The selected document, if it still exists.
    pub fn selected_document(&self) -> Option<&'a Document> {
        let store = self.store;
        self.state
            .selected_document_id
            .as_deref()
            .and_then(|id| store.find_document(id))
    }

    /// The current state.
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// The storage adapter.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage adapter.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

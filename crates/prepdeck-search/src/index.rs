//! Flattened word index over a document store.
//!
//! Titles and bodies are lowercased and split on whitespace. No stemming,
//! no stop words, and no deduplication: the word lists mirror the text.

use std::{collections::HashMap, fs, path::Path, sync::Arc};

use prepdeck_core::{Document, DocumentStore};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::SearchError;

/// Maximum recommended size for an exported index (2MB).
pub const MAX_EXPORT_SIZE: usize = 2 * 1024 * 1024;

/// Pre-split word lists for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndexEntry {
    /// The indexed document.
    pub document: Arc<Document>,

    /// Lowercased title words.
    pub title_words: Vec<String>,

    /// Lowercased content words.
    pub content_words: Vec<String>,
}

impl SearchIndexEntry {
    /// Build the entry for one document.
    pub fn new(document: Arc<Document>) -> Self {
        let title_words = split_words(&document.title);
        let content_words = split_words(&document.content);
        Self {
            document,
            title_words,
            content_words,
        }
    }
}

/// Lookup table from document id to its word lists, in traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchIndex {
    entries: Vec<SearchIndexEntry>,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl SearchIndex {
    /// Build the index for every document reachable in `store`.
    ///
    /// When two documents share an id the first one in traversal order is
    /// kept.
    pub fn build(store: &DocumentStore) -> Self {
        let mut index = Self::default();

        for document in store.documents() {
            if index.positions.contains_key(&document.id) {
                warn!(id = %document.id, "duplicate document id, keeping first");
                continue;
            }
            index.push(SearchIndexEntry::new(Arc::new(document.clone())));
        }

        info!(documents = index.len(), "built search index");
        index
    }

    fn push(&mut self, entry: SearchIndexEntry) {
        self.positions
            .insert(entry.document.id.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// Entry for a document id.
    pub fn get(&self, id: &str) -> Option<&SearchIndexEntry> {
        self.positions.get(id).map(|&pos| &self.entries[pos])
    }

    /// Entries in insertion (traversal) order.
    pub fn entries(&self) -> &[SearchIndexEntry] {
        &self.entries
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the index to JSON.
    pub fn to_json(&self) -> Result<String, SearchError> {
        serde_json::to_string(self).map_err(|e| SearchError::Serialization(e.to_string()))
    }

    /// Deserialize an index from JSON, rebuilding the id lookup.
    pub fn from_json(json: &str) -> Result<Self, SearchError> {
        let parsed: Self =
            serde_json::from_str(json).map_err(|e| SearchError::Serialization(e.to_string()))?;

        let mut index = Self::default();
        for entry in parsed.entries {
            index.push(entry);
        }
        Ok(index)
    }

    /// Write the index to a file.
    pub fn write_to_file(&self, path: &Path) -> Result<(), SearchError> {
        let json = self.to_json()?;

        if json.len() > MAX_EXPORT_SIZE {
            warn!(
                size = json.len(),
                max = MAX_EXPORT_SIZE,
                "exported search index exceeds recommended size"
            );
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SearchError::Io(e.to_string()))?;
        }
        fs::write(path, json).map_err(|e| SearchError::Io(e.to_string()))?;
        Ok(())
    }
}

/// Lowercase and split on whitespace, dropping empty pieces.
pub(crate) fn split_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use prepdeck_core::{Category, Section};

    use super::*;

    fn store() -> DocumentStore {
        DocumentStore::new(vec![Section::new(
            "frontend",
            "Frontend",
            vec![
                Category::single(
                    "hooks",
                    "Hooks",
                    Document::new("react-hooks", "React Hooks", "useState and  useEffect\n\nRules"),
                ),
                Category::nested(
                    "css",
                    "CSS",
                    vec![Category::list(
                        "layout",
                        "Layout",
                        vec![Document::new("flexbox", "Flexbox Guide", "Main axis")],
                    )],
                ),
            ],
        )])
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("React  Hooks\n\tGuide"), vec!["react", "hooks", "guide"]);
        assert!(split_words("   ").is_empty());
        assert_eq!(split_words("a a a"), vec!["a", "a", "a"]);
    }

    #[test]
    fn test_build_includes_nested_documents() {
        let index = SearchIndex::build(&store());
        assert_eq!(index.len(), 2);

        let entry = index.get("react-hooks").expect("entry");
        assert_eq!(entry.title_words, vec!["react", "hooks"]);
        assert_eq!(entry.content_words, vec!["usestate", "and", "useeffect", "rules"]);

        assert!(index.get("flexbox").is_some());
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn test_build_is_idempotent() {
        let store = store();
        assert_eq!(SearchIndex::build(&store), SearchIndex::build(&store));
    }

    #[test]
    fn test_empty_store() {
        let index = SearchIndex::build(&DocumentStore::default());
        assert!(index.is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let store = DocumentStore::new(vec![Section::new(
            "s",
            "S",
            vec![Category::list(
                "c",
                "C",
                vec![
                    Document::new("dup", "First", ""),
                    Document::new("dup", "Second", ""),
                ],
            )],
        )]);
        let index = SearchIndex::build(&store);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("dup").map(|e| e.document.title.as_str()), Some("First"));
    }

    #[test]
    fn test_export_and_reload() {
        let index = SearchIndex::build(&store());
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("index.json");
        index.write_to_file(&path).expect("write");

        let json = fs::read_to_string(&path).expect("read");
        let reloaded = SearchIndex::from_json(&json).expect("parse");
        assert_eq!(reloaded, index);
        assert!(reloaded.get("flexbox").is_some());
    }
}

//! The application-owned search entry point.

use std::sync::Arc;

use prepdeck_core::{Document, DocumentStore};
use tracing::debug;

use crate::{
    index::SearchIndex,
    query::{SearchHit, SearchQuery, search_hits},
};

/// Search over one document store.
///
/// Constructed once at startup; the index is built in the constructor and
/// never invalidated, so share the service by reference or `Arc`.
#[derive(Debug, Clone)]
pub struct SearchService {
    index: SearchIndex,
    limit: Option<usize>,
}

impl SearchService {
    /// Build the index for `store`.
    pub fn new(store: &DocumentStore) -> Self {
        Self::from_index(SearchIndex::build(store))
    }

    /// Wrap an already built (or reloaded) index.
    pub fn from_index(index: SearchIndex) -> Self {
        Self { index, limit: None }
    }

    /// Cap the number of results; `None` means unlimited.
    #[must_use]
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// The underlying index.
    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    /// Hits for a raw query, title matches first.
    pub fn hits(&self, raw_query: &str) -> Vec<SearchHit> {
        let query = SearchQuery::parse(raw_query);
        let mut hits = search_hits(&self.index, &query);
        if let Some(limit) = self.limit {
            hits.truncate(limit);
        }
        debug!(query = %raw_query, hits = hits.len(), "search");
        hits
    }

    /// Matching documents for a raw query, title matches first.
    pub fn search(&self, raw_query: &str) -> Vec<Arc<Document>> {
        self.hits(raw_query)
            .into_iter()
            .map(|hit| hit.document)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use prepdeck_core::{Category, Section};

    use super::*;

    fn store() -> DocumentStore {
        DocumentStore::new(vec![Section::new(
            "dsa",
            "DSA",
            vec![Category::list(
                "graphs",
                "Graphs",
                vec![
                    Document::new("bfs", "Breadth First Search", "queue based traversal"),
                    Document::new("dfs", "Depth First Search", "stack based traversal"),
                    Document::new("dijkstra", "Dijkstra", "shortest path with a priority queue"),
                ],
            )],
        )])
    }

    #[test]
    fn test_search() {
        let service = SearchService::new(&store());
        let ids: Vec<_> = service.search("queue").iter().map(|d| d.id.clone()).collect();
        assert_eq!(ids, vec!["bfs", "dijkstra"]);
    }

    #[test]
    fn test_limit() {
        let service = SearchService::new(&store()).with_limit(Some(1));
        assert_eq!(service.search("search").len(), 1);
        assert_eq!(service.search("search")[0].id, "bfs");
    }

    #[test]
    fn test_index_built_once() {
        let service = SearchService::new(&store());
        assert_eq!(service.index().len(), 3);
        assert!(service.search("").is_empty());
    }
}

//! Query parsing and matching.
//!
//! A document matches when any query word is a substring of any of its title
//! words (a title match) or, failing that, of any of its content words (a
//! content match). Title matches sort before content matches; within each
//! bucket the index order is kept.

use std::sync::Arc;

use prepdeck_core::Document;
use serde::{Deserialize, Serialize};

use crate::index::{SearchIndex, split_words};

/// A tokenized query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// The query as typed.
    pub raw: String,

    /// Lowercased, non-empty words.
    pub words: Vec<String>,
}

impl SearchQuery {
    /// Tokenize a raw query.
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            words: split_words(raw),
        }
    }

    /// Whether a search is in progress. Empty or blank queries are not.
    pub fn is_active(&self) -> bool {
        !self.words.is_empty()
    }

    fn matches_any(&self, words: &[String]) -> bool {
        self.words
            .iter()
            .any(|q| words.iter().any(|w| w.contains(q.as_str())))
    }
}

/// Where a document matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// Some query word appears inside a title word.
    Title,
    /// Only the body matched.
    Content,
}

/// One matched document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matched document.
    pub document: Arc<Document>,

    /// Which field matched.
    pub kind: MatchKind,
}

/// Run `query` against `index`, returning hits with their match kind.
///
/// An inactive query yields no hits.
pub fn search_hits(index: &SearchIndex, query: &SearchQuery) -> Vec<SearchHit> {
    if !query.is_active() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = index
        .entries()
        .iter()
        .filter_map(|entry| {
            let kind = if query.matches_any(&entry.title_words) {
                MatchKind::Title
            } else if query.matches_any(&entry.content_words) {
                MatchKind::Content
            } else {
                return None;
            };
            Some(SearchHit {
                document: Arc::clone(&entry.document),
                kind,
            })
        })
        .collect();

    // stable: index order is kept inside each bucket
    hits.sort_by_key(|hit| hit.kind);
    hits
}

/// Run a raw query string against `index`.
pub fn search(index: &SearchIndex, raw_query: &str) -> Vec<Arc<Document>> {
    search_hits(index, &SearchQuery::parse(raw_query))
        .into_iter()
        .map(|hit| hit.document)
        .collect()
}

#[cfg(test)]
mod tests {
    use prepdeck_core::{Category, DocumentStore, Section};

    use super::*;

    fn index() -> SearchIndex {
        let docs = vec![
            Document::new("closures", "JavaScript Closures", "A closure captures react state"),
            Document::new("hooks", "React Hooks", "useState and useEffect"),
            Document::new("event-loop", "Event Loop", "Microtasks run before macrotasks"),
            Document::new("fiber", "Reconciliation", "React fiber architecture"),
        ];
        let store = DocumentStore::new(vec![Section::new(
            "frontend",
            "Frontend",
            vec![Category::list("js", "JavaScript", docs)],
        )]);
        SearchIndex::build(&store)
    }

    fn ids(results: &[Arc<Document>]) -> Vec<&str> {
        results.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn test_substring_match() {
        let index = index();
        assert_eq!(ids(&search(&index, "hoo")), vec!["hooks"]);
        assert_eq!(ids(&search(&index, "rea")), vec!["hooks", "closures", "fiber"]);
    }

    #[test]
    fn test_case_insensitive() {
        let index = index();
        assert_eq!(ids(&search(&index, "HOOK")), vec!["hooks"]);
        assert_eq!(ids(&search(&index, "MicroTasks")), vec!["event-loop"]);
    }

    #[test]
    fn test_no_match() {
        assert!(search(&index(), "xyz123").is_empty());
    }

    #[test]
    fn test_title_before_content() {
        let hits = search_hits(&index(), &SearchQuery::parse("react"));
        let summary: Vec<_> = hits.iter().map(|h| (h.document.id.as_str(), h.kind)).collect();
        assert_eq!(
            summary,
            vec![
                ("hooks", MatchKind::Title),
                ("closures", MatchKind::Content),
                ("fiber", MatchKind::Content),
            ]
        );
    }

    #[test]
    fn test_any_word_matches() {
        let results = search(&index(), "loop closures");
        assert_eq!(ids(&results), vec!["closures", "event-loop"]);
    }

    #[test]
    fn test_empty_query_is_inactive() {
        let index = index();
        assert!(search(&index, "").is_empty());
        assert!(search(&index, "   \t").is_empty());
        assert!(!SearchQuery::parse("  ").is_active());
        assert!(SearchQuery::parse(" a ").is_active());
    }

    #[test]
    fn test_deterministic() {
        let index = index();
        assert_eq!(search(&index, "re"), search(&index, "re"));
    }
}

//! The document tree: sections, categories, and documents.
//!
//! A [`DocumentStore`] is assembled once at startup and never mutated. Every
//! category carries exactly one body form, expressed by [`CategoryContent`],
//! so traversal never has to guess which of its fields is populated.

use std::{
    collections::{HashMap, HashSet},
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single markdown-backed content unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier, unique across the whole store.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Raw markdown body.
    pub content: String,

    /// Short summary shown in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-form tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Sort weight among siblings (lower first).
    #[serde(default)]
    pub weight: i32,

    /// File the document was loaded from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
}

impl Document {
    /// Create a document with only the required fields set.
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            description: None,
            tags: Vec::new(),
            weight: 0,
            source_path: None,
        }
    }
}

/// The body of a category. Exactly one form per node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CategoryContent {
    /// The category is a direct link to one document.
    SingleDocument { document: Document },
    /// The category groups a flat list of documents.
    DocumentList { documents: Vec<Document> },
    /// The category groups nested categories.
    SubcategoryList { children: Vec<Category> },
}

/// An organizational node in the sidebar tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier, unique among siblings only.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Sort weight among siblings (lower first).
    #[serde(default)]
    pub weight: i32,

    /// Documents or child categories.
    #[serde(flatten)]
    pub content: CategoryContent,
}

impl Category {
    fn with_content(id: impl Into<String>, title: impl Into<String>, content: CategoryContent) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            weight: 0,
            content,
        }
    }

    /// Category pointing at exactly one document.
    pub fn single(id: impl Into<String>, title: impl Into<String>, document: Document) -> Self {
        Self::with_content(id, title, CategoryContent::SingleDocument { document })
    }

    /// Category holding a list of documents.
    pub fn list(id: impl Into<String>, title: impl Into<String>, documents: Vec<Document>) -> Self {
        Self::with_content(id, title, CategoryContent::DocumentList { documents })
    }

    /// Category holding child categories.
    pub fn nested(id: impl Into<String>, title: impl Into<String>, children: Vec<Category>) -> Self {
        Self::with_content(id, title, CategoryContent::SubcategoryList { children })
    }

    /// Set the icon name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Set the sort weight.
    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    /// Documents attached directly to this category (not to its children).
    pub fn own_documents(&self) -> &[Document] {
        match &self.content {
            CategoryContent::SingleDocument { document } => std::slice::from_ref(document),
            CategoryContent::DocumentList { documents } => documents,
            CategoryContent::SubcategoryList { .. } => &[],
        }
    }

    /// Direct child categories.
    pub fn children(&self) -> &[Category] {
        match &self.content {
            CategoryContent::SubcategoryList { children } => children,
            _ => &[],
        }
    }

    /// Whether this category directly holds the document with `id`.
    pub fn holds_document(&self, id: &str) -> bool {
        self.own_documents().iter().any(|doc| doc.id == id)
    }

    /// Whether the category has nothing to show.
    pub fn is_empty(&self) -> bool {
        match &self.content {
            CategoryContent::SingleDocument { .. } => false,
            CategoryContent::DocumentList { documents } => documents.is_empty(),
            CategoryContent::SubcategoryList { children } => children.is_empty(),
        }
    }
}

/// Top-level grouping of categories, e.g. "Frontend" or "Backend".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section identifier.
    pub id: String,

    /// Display title.
    pub title: String,

    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Sort weight among sections (lower first).
    #[serde(default)]
    pub weight: i32,

    /// Top-level categories of this section.
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl Section {
    /// Create a section.
    pub fn new(id: impl Into<String>, title: impl Into<String>, categories: Vec<Category>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            weight: 0,
            categories,
        }
    }
}

/// The immutable document tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStore {
    sections: Vec<Section>,
}

impl DocumentStore {
    /// Create a store from sections, kept in the given order.
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// All sections in order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Iterate over every document in traversal order.
    ///
    /// Sections and categories are visited in order; a category's own
    /// documents come before those of its children.
    pub fn documents(&self) -> Documents<'_> {
        Documents {
            sections: self.sections.iter(),
            stack: Vec::new(),
            pending: Default::default(),
        }
    }

    /// The first document in traversal order.
    pub fn first_document(&self) -> Option<&Document> {
        self.documents().next()
    }

    /// Look up a document by id.
    pub fn find_document(&self, id: &str) -> Option<&Document> {
        self.documents().find(|doc| doc.id == id)
    }

    /// Number of documents in the store.
    pub fn len(&self) -> usize {
        self.documents().count()
    }

    /// Whether the store has no documents.
    pub fn is_empty(&self) -> bool {
        self.first_document().is_none()
    }

    /// Ancestor category ids from the top-level category down to the
    /// category that directly holds `document_id`.
    ///
    /// The first holding category in depth-first order wins. Returns `None`
    /// when no category holds the document.
    pub fn expansion_path(&self, document_id: &str) -> Option<Vec<String>> {
        let mut path = Vec::new();
        for section in &self.sections {
            for category in &section.categories {
                if path_to(category, document_id, &mut path) {
                    return Some(path);
                }
            }
        }
        None
    }

    /// Counts of sections, categories, and documents.
    pub fn stats(&self) -> StoreStats {
        fn count(categories: &[Category], stats: &mut StoreStats) {
            for category in categories {
                stats.categories += 1;
                stats.documents += category.own_documents().len();
                count(category.children(), stats);
            }
        }

        let mut stats = StoreStats {
            sections: self.sections.len(),
            ..StoreStats::default()
        };
        for section in &self.sections {
            count(&section.categories, &mut stats);
        }
        stats
    }

    /// Structural diagnostics for the tree.
    pub fn check(&self) -> Vec<StoreIssue> {
        let mut issues = Vec::new();
        let mut doc_counts: HashMap<&str, usize> = HashMap::new();
        let mut category_paths: HashMap<&str, usize> = HashMap::new();

        for doc in self.documents() {
            *doc_counts.entry(doc.id.as_str()).or_default() += 1;
            if doc.content.trim().is_empty() {
                issues.push(StoreIssue::EmptyDocument { id: doc.id.clone() });
            }
        }

        for section in &self.sections {
            if section.categories.is_empty() {
                issues.push(StoreIssue::EmptySection {
                    id: section.id.clone(),
                });
            }
            check_siblings(
                &section.categories,
                &section.id,
                &mut category_paths,
                &mut issues,
            );
        }

        let mut duplicate_docs: Vec<_> = doc_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .collect();
        duplicate_docs.sort_unstable();
        for (id, count) in duplicate_docs {
            issues.push(StoreIssue::DuplicateDocumentId {
                id: id.to_string(),
                count,
            });
        }

        let mut reused: Vec<_> = category_paths
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id.to_string())
            .collect();
        reused.sort_unstable();
        for id in reused {
            issues.push(StoreIssue::CategoryIdReused { id });
        }

        issues
    }

    /// Serialize the store to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a store from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a store previously written with [`DocumentStore::to_json_pretty`].
    pub fn read_json(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

fn path_to(category: &Category, document_id: &str, path: &mut Vec<String>) -> bool {
    path.push(category.id.clone());
    if category.holds_document(document_id) {
        return true;
    }
    for child in category.children() {
        if path_to(child, document_id, path) {
            return true;
        }
    }
    path.pop();
    false
}

fn check_siblings<'a>(
    categories: &'a [Category],
    parent: &str,
    seen_anywhere: &mut HashMap<&'a str, usize>,
    issues: &mut Vec<StoreIssue>,
) {
    let mut siblings = HashSet::new();
    for category in categories {
        let location = format!("{parent}/{}", category.id);
        if !siblings.insert(category.id.as_str()) {
            issues.push(StoreIssue::DuplicateSiblingCategory {
                parent: parent.to_string(),
                id: category.id.clone(),
            });
        }
        *seen_anywhere.entry(category.id.as_str()).or_default() += 1;
        if category.is_empty() {
            issues.push(StoreIssue::EmptyCategory {
                path: location.clone(),
            });
        }
        check_siblings(category.children(), &location, seen_anywhere, issues);
    }
}

/// Depth-first iterator over the documents of a [`DocumentStore`].
#[derive(Debug, Clone)]
pub struct Documents<'a> {
    sections: std::slice::Iter<'a, Section>,
    stack: Vec<&'a Category>,
    pending: std::slice::Iter<'a, Document>,
}

impl<'a> Iterator for Documents<'a> {
    type Item = &'a Document;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(doc) = self.pending.next() {
                return Some(doc);
            }
            if let Some(category) = self.stack.pop() {
                self.pending = category.own_documents().iter();
                self.stack.extend(category.children().iter().rev());
                continue;
            }
            let section = self.sections.next()?;
            self.stack.extend(section.categories.iter().rev());
        }
    }
}

/// Size summary of a store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub sections: usize,
    pub categories: usize,
    pub documents: usize,
}

/// A structural problem found by [`DocumentStore::check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreIssue {
    /// Two or more documents share an id; lookups resolve to the first.
    DuplicateDocumentId { id: String, count: usize },
    /// Two categories with the same id under one parent.
    DuplicateSiblingCategory { parent: String, id: String },
    /// A category id that appears in more than one branch.
    CategoryIdReused { id: String },
    /// A category with no documents and no children.
    EmptyCategory { path: String },
    /// A section with no categories.
    EmptySection { id: String },
    /// A document whose body is blank.
    EmptyDocument { id: String },
}

impl StoreIssue {
    /// Whether the issue breaks lookups (as opposed to a cosmetic warning).
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateDocumentId { .. } | Self::DuplicateSiblingCategory { .. }
        )
    }
}

impl fmt::Display for StoreIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateDocumentId { id, count } => {
                write!(f, "document id '{id}' is used {count} times")
            }
            Self::DuplicateSiblingCategory { parent, id } => {
                write!(f, "category id '{id}' appears twice under '{parent}'")
            }
            Self::CategoryIdReused { id } => {
                write!(f, "category id '{id}' is reused in several branches")
            }
            Self::EmptyCategory { path } => write!(f, "category '{path}' is empty"),
            Self::EmptySection { id } => write!(f, "section '{id}' has no categories"),
            Self::EmptyDocument { id } => write!(f, "document '{id}' has no content"),
        }
    }
}

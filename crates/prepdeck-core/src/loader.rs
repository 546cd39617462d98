//! Assemble a [`DocumentStore`] from a directory of markdown files.
//!
//! Layout:
//!
//! ```text
//! content/
//! ├── frontend/              # section
//! │   ├── _index.md          # section title, icon, weight
//! │   ├── overview.md        # section-level document -> single-document category
//! │   └── react/             # category
//! │       ├── _index.md
//! │       ├── hooks/         # subcategory
//! │       │   ├── use-state.md
//! │       │   └── use-effect.md
//! │       └── jsx.md         # next to a subdirectory -> single-document child
//! └── backend/
//!     └── node/
//!         └── event-loop.md  # sole document -> single-document category
//! ```

use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    content::{Category, CategoryContent, Document, DocumentStore, Section},
    error::{CoreError, Result},
    frontmatter::{Frontmatter, first_heading, parse_frontmatter},
};

const INDEX_MD: &str = "_index.md";
const INDEX_TOML: &str = "_index.toml";

/// Loads the content directory into a document tree.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
    include_drafts: bool,
}

impl ContentLoader {
    /// Create a loader rooted at `content_dir`.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            include_drafts: false,
        }
    }

    /// Whether documents marked `draft` are kept.
    #[must_use]
    pub fn with_drafts(mut self, include_drafts: bool) -> Self {
        self.include_drafts = include_drafts;
        self
    }

    /// Walk the content directory and build the store.
    pub fn load(&self) -> Result<DocumentStore> {
        info!(dir = %self.content_dir.display(), "loading content");

        if !self.content_dir.is_dir() {
            return Err(CoreError::load(
                &self.content_dir,
                "content directory does not exist or is not a directory",
            ));
        }

        let (dirs, files) = list_dir(&self.content_dir)?;
        for file in files {
            warn!(path = %file.display(), "ignoring file outside any section");
        }

        let mut sections = Vec::new();
        for dir in dirs {
            let meta = read_index(&dir)?;
            let id = dir_name(&dir);
            let categories = self.load_categories(&dir)?;

            let mut section = Section::new(
                id.clone(),
                meta.title.unwrap_or_else(|| title_from_stem(&id)),
                categories,
            );
            section.icon = meta.icon;
            section.weight = meta.weight;
            sections.push(section);
        }
        sections.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.title.cmp(&b.title)));

        let store = DocumentStore::new(sections);
        let stats = store.stats();
        info!(
            sections = stats.sections,
            categories = stats.categories,
            documents = stats.documents,
            "content loaded"
        );
        Ok(store)
    }

    /// Categories directly below `dir`: one per subdirectory plus one
    /// single-document category per markdown file.
    fn load_categories(&self, dir: &Path) -> Result<Vec<Category>> {
        let (subdirs, files) = list_dir(dir)?;
        let documents = self.load_documents(&files)?;
        self.with_leaf_categories(dir, &subdirs, documents)
    }

    /// Subdirectory categories followed by one leaf category per document,
    /// sorted. Leaf ids never collide with a sibling.
    fn with_leaf_categories(
        &self,
        dir: &Path,
        subdirs: &[PathBuf],
        documents: Vec<Document>,
    ) -> Result<Vec<Category>> {
        let mut categories = Vec::new();
        for subdir in subdirs {
            if let Some(category) = self.load_category(subdir)? {
                categories.push(category);
            }
        }

        let mut taken: HashSet<String> = categories.iter().map(|c| c.id.clone()).collect();
        for doc in documents {
            categories.push(leaf_category(doc, dir, &mut taken));
        }

        sort_categories(&mut categories);
        Ok(categories)
    }

    fn load_category(&self, dir: &Path) -> Result<Option<Category>> {
        let meta = read_index(dir)?;
        let id = dir_name(dir);
        let (subdirs, files) = list_dir(dir)?;
        let mut documents = self.load_documents(&files)?;

        let content = if subdirs.is_empty() {
            match documents.len() {
                0 => {
                    warn!(path = %dir.display(), "skipping empty category");
                    return Ok(None);
                }
                1 => CategoryContent::SingleDocument {
                    document: documents.remove(0),
                },
                _ => CategoryContent::DocumentList { documents },
            }
        } else {
            let children = self.with_leaf_categories(dir, &subdirs, documents)?;
            if children.is_empty() {
                warn!(path = %dir.display(), "skipping empty category");
                return Ok(None);
            }
            CategoryContent::SubcategoryList { children }
        };

        debug!(path = %dir.display(), id = %id, "loaded category");
        Ok(Some(Category {
            title: meta.title.unwrap_or_else(|| title_from_stem(&id)),
            id,
            icon: meta.icon,
            weight: meta.weight,
            content,
        }))
    }

    fn load_documents(&self, files: &[PathBuf]) -> Result<Vec<Document>> {
        let mut documents = Vec::new();
        for path in files {
            if !is_markdown(path) || file_name(path) == INDEX_MD {
                continue;
            }
            let raw = fs::read_to_string(path)?;
            let (fm, body) = parse_frontmatter(&raw, path)?;
            if fm.draft && !self.include_drafts {
                debug!(path = %path.display(), "skipping draft");
                continue;
            }
            documents.push(self.build_document(path, fm, body));
        }
        documents.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.title.cmp(&b.title)));
        Ok(documents)
    }

    fn build_document(&self, path: &Path, fm: Frontmatter, body: String) -> Document {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let id = fm.id.unwrap_or_else(|| self.slug_for(path));
        let title = fm
            .title
            .or_else(|| first_heading(&body))
            .unwrap_or_else(|| title_from_stem(&stem));

        Document {
            id,
            title,
            content: body,
            description: fm.description,
            tags: fm.tags,
            weight: fm.weight,
            source_path: Some(path.to_path_buf()),
        }
    }

    /// Path-derived id: the relative path without extension, `/`-joined.
    fn slug_for(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.content_dir).unwrap_or(path);
        let without_ext = relative.with_extension("");
        without_ext
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Wrap a document in a single-document category. The id is the last
/// segment of the document id, suffixed with `-doc` (then `-doc-2`, ...)
/// while a sibling already uses it.
fn leaf_category(document: Document, dir: &Path, taken: &mut HashSet<String>) -> Category {
    let base = document.id.rsplit('/').next().unwrap_or(&document.id);
    let mut id = base.to_string();
    let mut n = 1;
    while taken.contains(&id) {
        id = if n == 1 {
            format!("{base}-doc")
        } else {
            format!("{base}-doc-{n}")
        };
        n += 1;
    }
    if id != base {
        debug!(dir = %dir.display(), document = %document.id, id = %id, "renamed clashing leaf category");
    }
    taken.insert(id.clone());

    let title = document.title.clone();
    let weight = document.weight;
    Category::single(id, title, document).with_weight(weight)
}

fn sort_categories(categories: &mut [Category]) {
    categories.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.title.cmp(&b.title)));
}

/// Immediate subdirectories and files of `dir`, sorted by name. Hidden
/// entries are skipped.
fn list_dir(dir: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| CoreError::load(dir, e.to_string()))?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        if entry.file_type().is_dir() {
            dirs.push(entry.into_path());
        } else if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    Ok((dirs, files))
}

/// Metadata from `_index.md` frontmatter or `_index.toml`, if present.
fn read_index(dir: &Path) -> Result<Frontmatter> {
    let md = dir.join(INDEX_MD);
    if md.is_file() {
        let raw = fs::read_to_string(&md)?;
        let (fm, _) = parse_frontmatter(&raw, &md)?;
        return Ok(fm);
    }

    let toml_path = dir.join(INDEX_TOML);
    if toml_path.is_file() {
        let raw = fs::read_to_string(&toml_path)?;
        return toml::from_str(&raw)
            .map_err(|e| CoreError::frontmatter(&toml_path, e.to_string()));
    }

    Ok(Frontmatter::default())
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "md" | "markdown"))
}

fn dir_name(path: &Path) -> String {
    file_name(path)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// `event-loop` -> `Event Loop`.
fn title_from_stem(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, content).expect("write");
    }

    fn sample_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        write(root, "frontend/_index.md", "---\ntitle: Frontend\nweight: 1\n---\n");
        write(root, "frontend/react/_index.toml", "title = \"React\"\nicon = \"atom\"\n");
        write(root, "frontend/react/hooks/use-state.md", "# useState\nLocal state.");
        write(
            root,
            "frontend/react/hooks/use-effect.md",
            "---\ntitle: useEffect\nweight: 1\n---\nSide effects.",
        );
        write(root, "frontend/react/jsx.md", "---\nweight: -1\n---\nJSX syntax.");
        write(root, "backend/_index.md", "---\ntitle: Backend\nweight: 2\n---\n");
        write(root, "backend/node/event-loop.md", "The event loop.");
        write(root, "backend/node/draft.md", "---\ndraft: true\n---\nWIP");
        write(root, "backend/empty/.keep", "");
        write(root, "README.md", "ignored");
        dir
    }

    #[test]
    fn test_load_tree_shape() {
        let dir = sample_tree();
        let store = ContentLoader::new(dir.path()).load().expect("load");

        let sections = store.sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Frontend");
        assert_eq!(sections[1].title, "Backend");

        let react = &sections[0].categories[0];
        assert_eq!(react.id, "react");
        assert_eq!(react.title, "React");
        assert_eq!(react.icon.as_deref(), Some("atom"));

        let children = react.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].id, "jsx");
        assert!(matches!(children[0].content, CategoryContent::SingleDocument { .. }));
        assert_eq!(children[1].id, "hooks");

        let hooks = children[1].own_documents();
        assert_eq!(hooks.len(), 2);
        assert_eq!(hooks[0].title, "useState");
        assert_eq!(hooks[1].title, "useEffect");
    }

    #[test]
    fn test_document_ids_and_titles() {
        let dir = sample_tree();
        let store = ContentLoader::new(dir.path()).load().expect("load");

        let doc = store
            .find_document("backend/node/event-loop")
            .expect("event loop doc");
        assert_eq!(doc.title, "Event Loop");
        assert_eq!(doc.content, "The event loop.");
        assert!(doc.source_path.is_some());

        assert_eq!(
            store.expansion_path("frontend/react/hooks/use-effect"),
            Some(vec!["react".to_string(), "hooks".to_string()])
        );
    }

    #[test]
    fn test_drafts_and_empty_dirs() {
        let dir = sample_tree();

        let store = ContentLoader::new(dir.path()).load().expect("load");
        assert!(store.find_document("backend/node/draft").is_none());
        let backend = &store.sections()[1];
        assert_eq!(backend.categories.len(), 1);
        assert!(matches!(
            backend.categories[0].content,
            CategoryContent::SingleDocument { .. }
        ));

        let with_drafts = ContentLoader::new(dir.path())
            .with_drafts(true)
            .load()
            .expect("load");
        assert!(with_drafts.find_document("backend/node/draft").is_some());
    }

    #[test]
    fn test_missing_dir() {
        let err = ContentLoader::new("/nonexistent/content").load().unwrap_err();
        assert!(err.to_string().contains("Load error"));
    }

    #[test]
    fn test_frontmatter_id_override() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write(dir.path(), "dsa/graphs/bfs.md", "---\nid: bfs\n---\nBreadth first.");
        let store = ContentLoader::new(dir.path()).load().expect("load");
        assert!(store.find_document("bfs").is_some());
    }

    #[test]
    fn test_file_beside_same_named_dir_gets_distinct_id() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path();
        write(root, "frontend/react/hooks.md", "Hooks overview.");
        write(root, "frontend/react/hooks/use-state.md", "Local state.");
        write(root, "frontend/react/jsx.md", "JSX syntax.");
        write(root, "frontend/intro.md", "Section intro.");
        write(root, "frontend/intro/basics.md", "Basics.");

        let store = ContentLoader::new(root).load().expect("load");
        let section = &store.sections()[0];

        let mut top: Vec<_> = section.categories.iter().map(|c| c.id.as_str()).collect();
        top.sort_unstable();
        assert_eq!(top, vec!["intro", "intro-doc", "react"]);

        let react = section
            .categories
            .iter()
            .find(|c| c.id == "react")
            .expect("react");
        let mut ids: Vec<_> = react.children().iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["hooks", "hooks-doc", "jsx"]);

        assert!(store.check().is_empty());
        assert_eq!(
            store.expansion_path("frontend/react/hooks"),
            Some(vec!["react".to_string(), "hooks-doc".to_string()])
        );
        assert_eq!(
            store.expansion_path("frontend/react/hooks/use-state"),
            Some(vec!["react".to_string(), "hooks".to_string()])
        );
    }

    #[test]
    fn test_title_ignores_headings_in_code_blocks() {
        let dir = tempfile::tempdir().expect("create temp dir");
        write(
            dir.path(),
            "devops/docker/setup.md",
            "Install it first:\n\n```bash\n# install docker\napt install docker.io\n```\n\n## Usage\n",
        );

        let store = ContentLoader::new(dir.path()).load().expect("load");
        let doc = store
            .find_document("devops/docker/setup")
            .expect("setup doc");
        assert_eq!(doc.title, "Setup");
    }

    #[test]
    fn test_title_from_stem() {
        assert_eq!(title_from_stem("event-loop"), "Event Loop");
        assert_eq!(title_from_stem("big_o"), "Big O");
        assert_eq!(title_from_stem("x"), "X");
    }
}

//! Text output for the terminal.

use std::fmt::Write as _;

use prepdeck_core::{Category, DocumentStore};
use prepdeck_nav::SelectionState;
use pulldown_cmark::{Options, Parser, html};

/// Hand a document body to the markdown renderer.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render the sidebar as indented text.
///
/// Collapsed categories show `▸` and hide their contents; expanded ones show
/// `▾`. The selected document is marked with `*`. With `expand_all` every
/// category is open.
pub fn sidebar(store: &DocumentStore, state: &SelectionState, expand_all: bool) -> String {
    let mut out = String::new();
    for section in store.sections() {
        let _ = writeln!(out, "{}", section.title);
        for category in &section.categories {
            category_lines(&mut out, category, state, expand_all, 1);
        }
    }
    out
}

fn category_lines(
    out: &mut String,
    category: &Category,
    state: &SelectionState,
    expand_all: bool,
    depth: usize,
) {
    let indent = "  ".repeat(depth);
    let open = expand_all || state.expanded_category_ids.contains(&category.id);
    let marker = if open { '▾' } else { '▸' };
    let _ = writeln!(out, "{indent}{marker} {} [{}]", category.title, category.id);

    if !open {
        return;
    }

    for doc in category.own_documents() {
        let selected = state.selected_document_id.as_deref() == Some(doc.id.as_str());
        let mark = if selected { '*' } else { '-' };
        let _ = writeln!(out, "{indent}  {mark} {} ({})", doc.title, doc.id);
    }
    for child in category.children() {
        category_lines(out, child, state, expand_all, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use prepdeck_core::{Document, Section};

    use super::*;

    fn store() -> DocumentStore {
        DocumentStore::new(vec![Section::new(
            "frontend",
            "Frontend",
            vec![Category::nested(
                "react",
                "React",
                vec![Category::list(
                    "hooks",
                    "Hooks",
                    vec![Document::new("use-state", "useState", "x")],
                )],
            )],
        )])
    }

    #[test]
    fn test_markdown_to_html() {
        let html = markdown_to_html("# Title\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_sidebar_collapsed() {
        let out = sidebar(&store(), &SelectionState::default(), false);
        assert_eq!(out, "Frontend\n  ▸ React [react]\n");
    }

    #[test]
    fn test_sidebar_expanded_with_selection() {
        let mut state = SelectionState::default();
        state.selected_document_id = Some("use-state".to_string());
        state.expanded_category_ids.insert("react".to_string());
        state.expanded_category_ids.insert("hooks".to_string());

        let out = sidebar(&store(), &state, false);
        assert_eq!(
            out,
            "Frontend\n  ▾ React [react]\n    ▾ Hooks [hooks]\n      * useState (use-state)\n"
        );

        state.expanded_category_ids.clear();
        assert_eq!(out, sidebar(&store(), &state, true));
    }
}

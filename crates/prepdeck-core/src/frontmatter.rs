//! Frontmatter parsing for content files.

use std::path::Path;

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Frontmatter metadata for documents and `_index` files.
///
/// Every field is optional; the loader derives ids and titles from the file
/// path and body when they are missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Explicit document id, overriding the path-derived one.
    #[serde(default)]
    pub id: Option<String>,

    /// Display title.
    #[serde(default)]
    pub title: Option<String>,

    /// Summary for listings.
    #[serde(default)]
    pub description: Option<String>,

    /// Icon name (sections and categories).
    #[serde(default)]
    pub icon: Option<String>,

    /// Tags for the document.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Sort weight among siblings.
    #[serde(default)]
    pub weight: i32,

    /// Whether this is a draft.
    #[serde(default)]
    pub draft: bool,
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = closing_delimiter(after_first, delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Byte offset of the first line consisting only of `delimiter`, skipping the
/// rest of the opening line.
fn closing_delimiter(text: &str, delimiter: &str) -> Option<usize> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if offset > 0 && line.trim_end() == delimiter {
            return Some(offset);
        }
        offset += line.len();
    }
    None
}

/// Parse frontmatter from a string, returning it with the remaining body.
pub fn parse_frontmatter(content: &str, path: &Path) -> Result<(Frontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((Frontmatter::default(), content.to_string()));
    };

    if fm_str.is_empty() {
        return Ok((Frontmatter::default(), body.to_string()));
    }

    let frontmatter: Frontmatter = match format {
        FrontmatterFormat::Yaml => {
            serde_yaml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(path, e.to_string()))?
        }
    };

    Ok((frontmatter, body.to_string()))
}

/// Text of the first non-empty level-one heading of a markdown body.
///
/// Lines inside code blocks are not headings.
pub fn first_heading(body: &str) -> Option<String> {
    let mut heading: Option<String> = None;

    for event in Parser::new(body) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => heading = Some(String::new()),
            Event::Text(text) | Event::Code(text) => {
                if let Some(heading) = heading.as_mut() {
                    heading.push_str(&text);
                }
            }
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                if let Some(title) = heading.take() {
                    let title = title.trim();
                    if !title.is_empty() {
                        return Some(title.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_yaml() {
        let content = "---\ntitle: Hooks\n---\n# Body";
        let (format, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(format, FrontmatterFormat::Yaml);
        assert_eq!(fm, "title: Hooks");
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_split_none() {
        assert!(split_frontmatter("# Just markdown").is_none());
    }

    #[test]
    fn test_parse_yaml() {
        let content = r#"---
id: react-hooks
title: React Hooks
tags: [react, hooks]
weight: 2
---
Hooks let you use state."#;
        let (fm, body) = parse_frontmatter(content, Path::new("hooks.md")).expect("parse");
        assert_eq!(fm.id.as_deref(), Some("react-hooks"));
        assert_eq!(fm.title.as_deref(), Some("React Hooks"));
        assert_eq!(fm.tags, vec!["react", "hooks"]);
        assert_eq!(fm.weight, 2);
        assert!(!fm.draft);
        assert_eq!(body, "Hooks let you use state.");
    }

    #[test]
    fn test_parse_toml() {
        let content = "+++\ntitle = \"Event Loop\"\ndraft = true\n+++\nBody";
        let (fm, body) = parse_frontmatter(content, Path::new("loop.md")).expect("parse");
        assert_eq!(fm.title.as_deref(), Some("Event Loop"));
        assert!(fm.draft);
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_without_frontmatter() {
        let (fm, body) = parse_frontmatter("plain text", Path::new("a.md")).expect("parse");
        assert_eq!(fm, Frontmatter::default());
        assert_eq!(body, "plain text");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let err = parse_frontmatter(content, Path::new("bad.md")).unwrap_err();
        assert!(err.to_string().contains("bad.md"));
    }

    #[test]
    fn test_split_ignores_delimiter_inside_value() {
        let content = "---\ndescription: a --- b\ntitle: Dashes\n---\nBody";
        let (_, fm, body) = split_frontmatter(content).expect("split");
        assert_eq!(fm, "description: a --- b\ntitle: Dashes");
        assert_eq!(body, "Body");

        let (fm, _) = parse_frontmatter(content, Path::new("dashes.md")).expect("parse");
        assert_eq!(fm.description.as_deref(), Some("a --- b"));
        assert_eq!(fm.title.as_deref(), Some("Dashes"));
    }

    #[test]
    fn test_split_empty_and_unclosed() {
        let (_, fm, body) = split_frontmatter("---\n---\nBody").expect("split");
        assert_eq!(fm, "");
        assert_eq!(body, "Body");

        assert!(split_frontmatter("---\ntitle: Open\nno closing ---").is_none());
    }

    #[test]
    fn test_first_heading() {
        assert_eq!(
            first_heading("intro\n\n# Closures\ntext").as_deref(),
            Some("Closures")
        );
        assert_eq!(first_heading("## Not level one"), None);
        assert_eq!(first_heading("#   \n"), None);
        assert_eq!(
            first_heading("# The `this` keyword").as_deref(),
            Some("The this keyword")
        );
    }

    #[test]
    fn test_first_heading_skips_code_blocks() {
        let body = "Install it first:\n\n```bash\n# install docker\napt install docker.io\n```\n\n## Usage";
        assert_eq!(first_heading(body), None);

        let body = "~~~\n# not a title\n~~~\n\n# Docker Setup\n";
        assert_eq!(first_heading(body).as_deref(), Some("Docker Setup"));
    }
}

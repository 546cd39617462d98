//! Interactive command - type-ahead search with debounced results

use std::{sync::Arc, time::Duration};

use color_eyre::eyre::{Result, WrapErr};
use prepdeck_search::{DebouncedSearch, SearchResults};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::search::print_hits;
use crate::{App, render};

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Leave the session.
    Quit,
    /// Print the sidebar.
    Tree,
    /// Open the n-th (1-based) hit of the last results.
    Open(usize),
    /// Expand or collapse a category.
    Toggle(String),
    /// Anything else is a search query.
    Query(String),
}

impl Input {
    /// Parse one line. Lines starting with `:` are commands.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Self::Query(line.to_string());
        };

        let mut parts = command.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("q" | "quit"), _) => Self::Quit,
            (Some("tree"), _) => Self::Tree,
            (Some("open"), Some(n)) => match n.parse() {
                Ok(n) if n > 0 => Self::Open(n),
                _ => Self::Query(line.to_string()),
            },
            (Some("toggle"), Some(id)) => Self::Toggle(id.to_string()),
            _ => Self::Query(line.to_string()),
        }
    }
}

/// Run the interactive session until `:q` or end of input.
pub async fn run(app: &App) -> Result<()> {
    let service = Arc::new(app.search_service());
    let delay = Duration::from_millis(app.config.search.debounce_ms);
    let mut search = DebouncedSearch::spawn(Arc::clone(&service), delay);

    let mut nav = app.navigator();
    if let Some(doc) = nav.restore_from_persisted() {
        println!("  Current: {} ({})", doc.title, doc.id);
    }
    println!("  Type to search. Commands: :open N, :toggle ID, :tree, :q");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = SearchResults::default();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.wrap_err("Failed to read input")? else {
                    break;
                };
                match Input::parse(&line) {
                    Input::Quit => break,
                    Input::Tree => print!("{}", render::sidebar(&app.store, nav.state(), false)),
                    Input::Toggle(id) => {
                        nav.toggle_category(&id);
                        print!("{}", render::sidebar(&app.store, nav.state(), false));
                    }
                    Input::Open(n) => match last.hits.get(n - 1) {
                        Some(hit) => {
                            nav.select_document(&hit.document);
                            nav.expand_path_to(&hit.document.id);
                            println!("# {}", hit.document.title);
                            println!();
                            println!("{}", hit.document.content);
                        }
                        None => println!("  No result #{n}"),
                    },
                    Input::Query(query) => search.submit(query),
                }
            }
            results = search.next_results() => {
                let Some(results) = results else {
                    break;
                };
                if !results.is_active() {
                    println!("  (search cleared)");
                } else if results.hits.is_empty() {
                    println!("  No results found for \"{}\"", results.query);
                } else {
                    print_hits(&results.hits);
                }
                last = results;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Input::parse(":q"), Input::Quit);
        assert_eq!(Input::parse("  :quit "), Input::Quit);
        assert_eq!(Input::parse(":tree"), Input::Tree);
        assert_eq!(Input::parse(":open 2"), Input::Open(2));
        assert_eq!(Input::parse(":toggle react"), Input::Toggle("react".to_string()));
    }

    #[test]
    fn test_parse_queries() {
        assert_eq!(Input::parse("react hooks"), Input::Query("react hooks".to_string()));
        assert_eq!(Input::parse(":open zero"), Input::Query(":open zero".to_string()));
        assert_eq!(Input::parse(":open 0"), Input::Query(":open 0".to_string()));
        assert_eq!(Input::parse(""), Input::Query(String::new()));
    }
}

//! Show command - print one document

use color_eyre::eyre::{Result, bail};

use crate::{App, render};

/// Run the show command.
///
/// Prints the raw markdown, or the rendered HTML with `html`.
pub fn run(app: &App, id: &str, html: bool) -> Result<()> {
    let Some(doc) = app.store.find_document(id) else {
        bail!("Unknown document id: {id}");
    };

    if html {
        print!("{}", render::markdown_to_html(&doc.content));
        return Ok(());
    }

    println!("# {}", doc.title);
    if let Some(path) = app.store.expansion_path(id) {
        println!("Path: {}", path.join(" > "));
    }
    if !doc.tags.is_empty() {
        println!("Tags: {}", doc.tags.join(", "));
    }
    println!();
    println!("{}", doc.content);
    Ok(())
}

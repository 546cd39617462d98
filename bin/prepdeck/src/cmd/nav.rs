//! Navigation commands - sidebar tree, selection, and restore

use color_eyre::eyre::{Result, bail};

use crate::{App, render};

/// Print the sidebar as the last session left it.
pub fn tree(app: &App, expand_all: bool) -> Result<()> {
    let mut nav = app.navigator();
    nav.restore_from_persisted();

    println!("{}", app.config.site.title);
    println!();
    print!("{}", render::sidebar(&app.store, nav.state(), expand_all));
    Ok(())
}

/// Select a document and persist the choice.
pub fn select(app: &App, id: &str) -> Result<()> {
    let mut nav = app.navigator();
    if !nav.select_by_id(id) {
        bail!("Unknown document id: {id}");
    }
    nav.expand_path_to(id);

    let expanded: Vec<_> = nav
        .state()
        .expanded_category_ids
        .iter()
        .map(String::as_str)
        .collect();
    println!("  ✓ Selected {id}");
    println!("  Expanded: {}", expanded.join(", "));
    Ok(())
}

/// Report what the next session would restore.
pub fn restore(app: &App) -> Result<()> {
    let mut nav = app.navigator();
    match nav.restore_from_persisted() {
        Some(doc) => {
            println!("Selected: {} ({})", doc.title, doc.id);
            let expanded: Vec<_> = nav
                .state()
                .expanded_category_ids
                .iter()
                .map(String::as_str)
                .collect();
            if expanded.is_empty() {
                println!("Expanded: (none)");
            } else {
                println!("Expanded: {}", expanded.join(", "));
            }
        }
        None => println!("No documents loaded"),
    }
    Ok(())
}

//! Index command - export the search index as JSON

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

use crate::App;

/// Run the index command.
pub fn run(app: &App, output: &Path) -> Result<()> {
    tracing::info!(?output, "Exporting search index");

    let service = app.search_service();
    service
        .index()
        .write_to_file(output)
        .wrap_err_with(|| format!("Failed to write index to {}", output.display()))?;

    println!(
        "  ✓ Indexed {} documents into {}",
        service.index().len(),
        output.display()
    );
    Ok(())
}

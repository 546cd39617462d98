//! Check command - validate configuration and content

use color_eyre::eyre::{Result, bail};
use prepdeck_core::DocumentStore;

use crate::App;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Collect structural issues of the store.
pub fn validate(store: &DocumentStore) -> ValidationResult {
    let mut result = ValidationResult::default();

    if store.is_empty() {
        result.add_warning("No documents found");
    }

    for issue in store.check() {
        if issue.is_error() {
            result.add_error(issue.to_string());
        } else {
            result.add_warning(issue.to_string());
        }
    }

    result
}

/// Run the check command.
pub fn run(app: &App, strict: bool) -> Result<()> {
    tracing::info!(strict, "Checking content");

    let stats = app.store.stats();
    println!("Checking content...");
    println!(
        "  ℹ {} sections, {} categories, {} documents",
        stats.sections, stats.categories, stats.documents
    );

    let result = validate(&app.store);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

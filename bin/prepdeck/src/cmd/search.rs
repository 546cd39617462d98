//! Search command - run one query against the index

use color_eyre::eyre::{Result, WrapErr};
use prepdeck_search::{MatchKind, SearchHit, SearchQuery};

use crate::App;

/// Run the search command.
pub fn run(app: &App, raw_query: &str, json: bool) -> Result<()> {
    tracing::info!(query = %raw_query, "Searching");

    let query = SearchQuery::parse(raw_query);
    if !query.is_active() {
        println!("No search active (empty query)");
        return Ok(());
    }

    let hits = app.search_service().hits(raw_query);

    if json {
        let out = serde_json::to_string_pretty(&hits).wrap_err("Failed to encode results")?;
        println!("{out}");
        return Ok(());
    }

    if hits.is_empty() {
        println!("No results found for \"{raw_query}\"");
        return Ok(());
    }

    println!("{} result(s) for \"{raw_query}\":", hits.len());
    print_hits(&hits);
    Ok(())
}

/// Print hits as a numbered list.
pub fn print_hits(hits: &[SearchHit]) {
    for (i, hit) in hits.iter().enumerate() {
        println!(
            "  {:>2}. {} ({}) [{}]",
            i + 1,
            hit.document.title,
            hit.document.id,
            kind_label(hit.kind)
        );
    }
}

fn kind_label(kind: MatchKind) -> &'static str {
    match kind {
        MatchKind::Title => "title",
        MatchKind::Content => "content",
    }
}

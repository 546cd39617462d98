//! Prepdeck CLI
//!
//! Browse, search, and read an interview-prep knowledge base from the terminal.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use prepdeck::{App, Overrides};

/// Command-line interface for Prepdeck.
#[derive(Parser)]
#[command(
    name = "prepdeck",
    version,
    about = "An interview-prep knowledge base for the terminal"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "prepdeck.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Override the content directory
    #[arg(long, global = true)]
    content: Option<std::path::PathBuf>,

    /// Override the state file holding the selection
    #[arg(long, global = true)]
    state: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Print the sidebar tree
    Tree {
        /// Expand every category
        #[arg(long)]
        all: bool,
    },
    /// Search document titles and content
    Search {
        /// Query text; a document matches if any word occurs inside a title or content word
        query: String,
        /// Print hits as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one document
    Show {
        /// Document id
        id: String,
        /// Render the content to HTML
        #[arg(long)]
        html: bool,
    },
    /// Select a document and remember it for the next session
    Select {
        /// Document id
        id: String,
    },
    /// Show what the next session would restore
    Restore,
    /// Validate the document tree
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Export the search index as JSON
    Index {
        /// Output file
        #[arg(short, long, default_value = "search-index.json")]
        output: std::path::PathBuf,
    },
    /// Type-ahead search session
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    prepdeck::init_tracing(cli.verbose);

    let overrides = Overrides {
        content_dir: cli.content,
        state_file: cli.state,
    };
    let app = App::load(&cli.config, &overrides)?;

    match cli.command {
        Commands::Tree { all } => prepdeck::cmd::nav::tree(&app, all)?,
        Commands::Search { query, json } => prepdeck::cmd::search::run(&app, &query, json)?,
        Commands::Show { id, html } => prepdeck::cmd::show::run(&app, &id, html)?,
        Commands::Select { id } => prepdeck::cmd::nav::select(&app, &id)?,
        Commands::Restore => prepdeck::cmd::nav::restore(&app)?,
        Commands::Check { strict } => prepdeck::cmd::check::run(&app, strict)?,
        Commands::Index { output } => prepdeck::cmd::index::run(&app, &output)?,
        Commands::Interactive => prepdeck::cmd::interactive::run(&app).await?,
    }

    Ok(())
}

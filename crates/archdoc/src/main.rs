//! archdoc CLI - architecture documentation exporter.
//!
//! Provides commands for:
//! - `convert`: Convert an HTML or Markdown page to ADF JSON (no network)
//! - `export`: Publish a page to Confluence Cloud
//! - `views`: Publish one page showing every exported diagram
//! - `adr`: Publish architecture decision records as a page tree
//! - `clean`: Delete a page and every page below it

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AdrArgs, CleanArgs, ConvertArgs, ExportArgs, ViewsArgs};
use output::Output;

/// archdoc - publish architecture documentation to Confluence.
#[derive(Parser)]
#[command(name = "archdoc", version, about)]
struct Cli {
    /// Log progress at info level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a page to ADF JSON on stdout.
    Convert(ConvertArgs),
    /// Publish a page to Confluence.
    Export(ExportArgs),
    /// Publish the page with all diagram views.
    Views(ViewsArgs),
    /// Publish architecture decision records below an index page.
    Adr(AdrArgs),
    /// Delete a page and all pages below it.
    Clean(CleanArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Convert(args) => args.execute(),
        Commands::Export(args) => args.execute(),
        Commands::Views(args) => args.execute(),
        Commands::Adr(args) => args.execute(),
        Commands::Clean(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

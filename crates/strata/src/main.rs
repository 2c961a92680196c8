//! Strata CLI - documentation reference and navigation engine.
//!
//! Provides commands for:
//! - `xref`: Convert one reference the way a page would render it
//! - `page`: Print the navigation and version model of a page
//! - `check`: Build every page model and report problems

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CatalogArgs, CheckArgs, PageArgs, XrefArgs};
use output::Output;

/// Strata - documentation reference and navigation engine.
#[derive(Parser)]
#[command(name = "strata", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a reference and print the resulting link as JSON.
    Xref(XrefArgs),
    /// Print the page model of a page as JSON.
    Page(PageArgs),
    /// Build every page model and report problems.
    Check(CheckArgs),
}

impl Commands {
    fn catalog_args(&self) -> &CatalogArgs {
        match self {
            Self::Xref(args) => &args.catalog,
            Self::Page(args) => &args.catalog,
            Self::Check(args) => &args.catalog,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.catalog_args().verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Xref(args) => args.execute(),
        Commands::Page(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

//! kitab CLI - documentation pipeline.
//!
//! Provides commands for:
//! - `build`: Pre-render the whole corpus into the cache
//! - `index`: Build the client-side search index as JSON

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{BuildArgs, IndexArgs};

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// kitab - versioned, multi-locale Markdown documentation pipeline.
#[derive(Parser)]
#[command(name = "kitab", version, about)]
struct Cli {
    /// Enable info-level logging.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pre-render all documentation into the cache.
    Build(BuildArgs),
    /// Build the search index and write it as JSON.
    Index(IndexArgs),
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(VERSION),
        Commands::Index(args) => args.execute(VERSION),
    };

    if let Err(err) = result {
        let term = console::Term::stderr();
        let _ = term.write_line(&format!("{} {err}", console::style("error:").red().bold()));
        std::process::exit(1);
    }
}

//! CLI command implementations.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;

use kitab_cache::{Cache, FileCache, MemoryCache};
use kitab_store::{Config, DocumentStore, IndexBuilder};

use crate::error::CliError;

/// Arguments for `kitab build`.
#[derive(Args)]
pub struct BuildArgs {
    /// Path to kitab.toml (discovered in parent directories by default).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pin a version directory instead of the latest discovered.
    #[arg(long)]
    pub doc_version: Option<String>,
}

impl BuildArgs {
    /// Pre-render every (locale, slug) pair into the cache.
    pub fn execute(self, version: &str) -> Result<(), CliError> {
        let term = console::Term::stdout();
        let config = load_config(self.config.as_deref())?;
        let cache = open_cache(&config, version);
        let store = match self.doc_version {
            Some(pinned) => DocumentStore::with_version(config, cache.as_ref(), Some(pinned)),
            None => DocumentStore::new(config, cache.as_ref()),
        };

        let _ = term.write_line("Starting documentation build...");
        let report = IndexBuilder::new(&store).warm();

        let summary = format!(
            "{} {} built, {} failed",
            style("done:").green().bold(),
            report.built,
            report.failed
        );
        let _ = term.write_line(&summary);

        Ok(())
    }
}

/// Arguments for `kitab index`.
#[derive(Args)]
pub struct IndexArgs {
    /// Path to kitab.toml (discovered in parent directories by default).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Restrict the index to one locale.
    #[arg(long)]
    pub locale: Option<String>,

    /// Output file; stdout when omitted.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl IndexArgs {
    /// Build the search index and emit it as JSON.
    pub fn execute(self, version: &str) -> Result<(), CliError> {
        let config = load_config(self.config.as_deref())?;
        let cache = open_cache(&config, version);
        let store = DocumentStore::new(config, cache.as_ref());

        let index = IndexBuilder::new(&store).build_index(self.locale.as_deref());
        let json = serde_json::to_string(&index)?;

        match self.output {
            Some(path) => fs::write(path, json)?,
            None => {
                let _ = console::Term::stdout().write_line(&json);
            }
        }

        Ok(())
    }
}

/// Load config from an explicit path, by discovery, or defaults.
fn load_config(explicit: Option<&std::path::Path>) -> Result<Config, CliError> {
    if let Some(path) = explicit {
        return Ok(Config::load(path)?);
    }

    let cwd = std::env::current_dir()?;
    match Config::discover(&cwd)? {
        Some((config, path)) => {
            tracing::info!(path = %path.display(), "using discovered config");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

/// Open the cache configured for the corpus, falling back to process memory.
fn open_cache(config: &Config, version: &str) -> Box<dyn Cache> {
    match &config.cache_dir {
        Some(dir) => Box::new(FileCache::new(dir.clone(), version)),
        None => {
            tracing::info!("no cache_dir configured, rendered documents will not persist");
            Box::new(MemoryCache::new())
        }
    }
}

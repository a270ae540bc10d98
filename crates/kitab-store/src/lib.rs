//! Document resolution, rendering orchestration and search indexing.
//!
//! This crate ties the pipeline together:
//!
//! - [`Config`]: the configuration surface (`kitab.toml`)
//! - [`PathResolver`]: maps (version, locale, slug) to a file path
//! - [`available_versions`]: discovers version directories under the root
//! - [`DocumentStore`]: resolves, renders and caches documents
//! - [`IndexBuilder`]: builds the flat search index and pre-warms the cache
//!
//! # Quick start
//!
//! ```no_run
//! use kitab_cache::MemoryCache;
//! use kitab_store::{Config, DocumentStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let cache = MemoryCache::new();
//! let store = DocumentStore::new(config, &cache);
//!
//! let doc = store.get("en", "guide")?;
//! println!("{}: {} headings", doc.title, doc.toc.len());
//! # Ok(())
//! # }
//! ```

mod config;
mod document;
mod error;
mod index;
mod resolver;
mod store;
mod versions;

pub use config::{Config, ConfigError};
pub use document::{Alternate, Breadcrumb, Document, Listing};
pub use error::StoreError;
pub use index::{IndexBuilder, IndexEntry, WarmReport};
pub use resolver::PathResolver;
pub use store::DocumentStore;
pub use versions::available_versions;

// Re-exported for consumers of [`Document`]
pub use kitab_content::{SearchChunk, TocEntry};

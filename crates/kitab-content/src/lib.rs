//! Front matter parsing and HTML post-processing for kitab.
//!
//! This crate owns everything that happens to a document around the Markdown
//! engine:
//!
//! - [`front_matter`]: splits a raw document into metadata and Markdown body
//! - [`headings`]: heading ID injection, TOC extraction, H1 handling
//! - [`links`]: external-link hardening and relative doc-link rewriting
//! - [`chunks`]: search-index chunk extraction
//! - [`slug`]: slug and headline helpers
//!
//! All HTML operations work on the engine's own rendered output, which keeps
//! the required parsing to predictable tag shapes.

pub mod chunks;
pub mod front_matter;
pub mod headings;
pub mod links;
pub mod slug;

mod text;

pub use chunks::{SearchChunk, extract_chunks};
pub use front_matter::{FrontMatter, parse as parse_front_matter};
pub use headings::{TocEntry, extract_h1, inject_heading_ids, strip_first_h1};
pub use links::{doc_url, rewrite_images, rewrite_links};
pub use slug::{headline, slugify};

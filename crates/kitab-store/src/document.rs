//! The document record and its parts.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use kitab_content::TocEntry;

/// A fully rendered document, as served to the templating layer.
///
/// Records are immutable once built; invalidation replaces the cache slot
/// wholesale with a fresh record. Serde round-tripping doubles as the cache's
/// structural validation — an entry missing any required field fails
/// deserialization and counts as a miss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Resolved title: front matter, else first H1, else filename-derived.
    pub title: String,
    /// Body HTML with the first H1 stripped, heading IDs injected, and links
    /// rewritten.
    pub html: String,
    /// Heading outline in document order.
    pub toc: Vec<TocEntry>,
    /// Navigation trail from the corpus root to this document.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Source file modification time (unix seconds).
    pub mtime: u64,
    /// Weak validator derived from path, mtime and content length.
    pub etag: String,
    /// Locales in which this document also resolves.
    pub alternates: Vec<Alternate>,
    /// Locale this record was rendered for.
    pub locale: String,
    /// Version this record was rendered for, if the corpus is versioned.
    pub version: Option<String>,
}

/// One step of a document's breadcrumb trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Display title.
    pub title: String,
    /// Slug to link to; `None` for the corpus root.
    pub slug: Option<String>,
}

/// A locale alternate of the same logical document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternate {
    /// Locale code.
    pub locale: String,
    /// Human-readable locale label.
    pub label: String,
    /// Canonical URL of the alternate.
    pub url: String,
    /// Whether this alternate is the locale being served.
    pub active: bool,
}

/// One entry of a locale's document listing (for navigation and batch jobs).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Document slug.
    pub slug: String,
    /// Listing title (front matter, else inferred).
    pub title: String,
    /// Sort order; front matter `order` or the configured default.
    pub order: i64,
    /// Source file path.
    pub path: PathBuf,
    /// Source file modification time (unix seconds).
    pub mtime: u64,
}

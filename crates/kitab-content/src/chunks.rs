//! Search-index chunk extraction.
//!
//! A document is segmented into one chunk per heading (levels 1–6) plus one
//! leading chunk for content preceding the first heading. Chunk granularity
//! keeps client-side full-text matches anchored to the nearest section.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::text::{heading_text, plain_text};

/// One record of the client-side search index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchChunk {
    /// Stable chunk identifier: the slug, with `#anchor` (or a positional
    /// index) appended for heading chunks.
    pub id: String,
    /// Slug of the owning document.
    pub slug: String,
    /// Title of the owning document.
    pub title: String,
    /// Heading text; `None` for the leading chunk.
    pub heading: Option<String>,
    /// Flattened section text.
    pub content: String,
    /// Heading anchor ID when one was injected.
    pub anchor: Option<String>,
}

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<h([1-6])([^>]*)>(.*?)</h[1-6]>").expect("static pattern"));

static ID_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"id="([^"]*)""#).expect("static pattern"));

/// Segment rendered HTML into search chunks.
///
/// Every heading produces a chunk even when its section content is empty —
/// the heading itself is worth indexing. The leading chunk is only emitted
/// when its flattened content is non-empty.
#[must_use]
pub fn extract_chunks(html: &str, slug: &str, title: &str) -> Vec<SearchChunk> {
    let mut chunks = Vec::new();

    let headings: Vec<_> = HEADING_RE.captures_iter(html).collect();

    // Content before the first heading
    let leading_end = headings
        .first()
        .and_then(|caps| caps.get(0))
        .map_or(html.len(), |m| m.start());
    let leading = plain_text(&html[..leading_end]);
    if !leading.is_empty() {
        chunks.push(SearchChunk {
            id: slug.to_owned(),
            slug: slug.to_owned(),
            title: title.to_owned(),
            heading: None,
            content: leading,
            anchor: None,
        });
    }

    for (index, caps) in headings.iter().enumerate() {
        let whole = caps.get(0).expect("group 0 always present");
        let attrs = &caps[2];
        let inner = &caps[3];

        let section_end = headings
            .get(index + 1)
            .and_then(|next| next.get(0))
            .map_or(html.len(), |m| m.start());
        let section = &html[whole.end()..section_end];

        let anchor = ID_ATTR_RE
            .captures(attrs)
            .map(|id_caps| id_caps[1].to_owned());
        let id = match &anchor {
            Some(anchor) => format!("{slug}#{anchor}"),
            None => format!("{slug}#{}", index + 1),
        };

        chunks.push(SearchChunk {
            id,
            slug: slug.to_owned(),
            title: title.to_owned(),
            heading: Some(heading_text(inner)),
            content: plain_text(section),
            anchor,
        });
    }

    chunks
}

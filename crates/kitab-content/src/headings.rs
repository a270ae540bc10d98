//! Heading ID injection, TOC extraction, and H1 handling.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::slug::slugify;
use crate::text::heading_text;

/// One entry of a document's table of contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading level (2 or 3).
    pub level: u8,
    /// Unique anchor ID within the document.
    pub id: String,
    /// Flattened heading text, permalink symbol excluded.
    pub text: String,
}

static H2_H3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<h([23])([^>]*)>(.*?)</h[23]>").expect("static pattern"));

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<h1[^>]*>(.*?)</h1>").expect("static pattern"));

/// Inject unique IDs into all level-2 and level-3 headings and collect the
/// table of contents, in document order.
///
/// The candidate ID is the slugified heading text (permalink anchors are
/// stripped before extraction). Collisions are resolved by appending `-1`,
/// `-2`, ... in first-seen order. The permalink anchor's `href` is pointed at
/// the assigned ID.
#[must_use]
pub fn inject_heading_ids(html: &str) -> (String, Vec<TocEntry>) {
    let mut toc = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    let html = H2_H3_RE.replace_all(html, |caps: &Captures<'_>| {
        let level: u8 = caps[1].parse().expect("matched digit");
        let attrs = &caps[2];
        let inner = &caps[3];

        let text = heading_text(inner);
        let base = slugify(&text);

        let mut id = base.clone();
        let mut counter = 1;
        while used.contains(&id) {
            id = format!("{base}-{counter}");
            counter += 1;
        }
        used.insert(id.clone());

        toc.push(TocEntry {
            level,
            id: id.clone(),
            text,
        });

        // Point the permalink anchor at the assigned ID
        let inner = inner.replacen(
            r##"class="heading-permalink" href="#""##,
            &format!(r##"class="heading-permalink" href="#{id}""##),
            1,
        );

        format!(r#"<h{level} id="{id}"{attrs}>{inner}</h{level}>"#)
    });

    (html.into_owned(), toc)
}

/// Extract the text of the first H1, or `None` when absent or empty.
#[must_use]
pub fn extract_h1(html: &str) -> Option<String> {
    let caps = H1_RE.captures(html)?;
    let text = heading_text(&caps[1]);
    (!text.is_empty()).then_some(text)
}

/// Remove exactly one (the first) H1 element, nested tags included.
#[must_use]
pub fn strip_first_h1(html: &str) -> String {
    H1_RE.replacen(html, 1, "").into_owned()
}

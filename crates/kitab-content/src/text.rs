//! Plain-text helpers shared by heading and chunk extraction.

use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("static pattern"));

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("static pattern"));

static PERMALINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<a\s[^>]*class="[^"]*heading-permalink[^"]*"[^>]*>.*?</a>"#)
        .expect("static pattern")
});

/// Remove heading permalink anchors so extracted text doesn't carry the
/// permalink symbol.
pub(crate) fn strip_permalinks(html: &str) -> String {
    PERMALINK_RE.replace_all(html, "").into_owned()
}

/// Remove all tags.
pub(crate) fn strip_tags(html: &str) -> String {
    TAG_RE.replace_all(html, "").into_owned()
}

/// Decode the entities the renderer emits.
pub(crate) fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// Tag-stripped, entity-decoded text with whitespace runs collapsed.
pub(crate) fn plain_text(html: &str) -> String {
    let stripped = strip_tags(html);
    let decoded = unescape_html(&stripped);
    WS_RE.replace_all(&decoded, " ").trim().to_owned()
}

/// Heading text: permalink anchors removed first, then flattened.
pub(crate) fn heading_text(inner_html: &str) -> String {
    plain_text(&strip_permalinks(inner_html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_collapses_whitespace() {
        assert_eq!(plain_text("<p>Do\n  this.</p>\n<p>Then that.</p>"), "Do this. Then that.");
    }

    #[test]
    fn test_plain_text_decodes_entities() {
        assert_eq!(plain_text("<p>Setup &amp; Config</p>"), "Setup & Config");
    }

    #[test]
    fn test_heading_text_strips_permalink() {
        let inner = r##"<a class="heading-permalink" href="#" aria-hidden="true">#</a>Setup"##;
        assert_eq!(heading_text(inner), "Setup");
    }

    #[test]
    fn test_heading_text_keeps_inline_code() {
        let inner = r##"<a class="heading-permalink" href="#" aria-hidden="true">#</a>Install <code>npm</code>"##;
        assert_eq!(heading_text(inner), "Install npm");
    }
}

//! Front matter parsing.
//!
//! A document may begin with a YAML metadata block delimited by `---` fences:
//!
//! ```text
//! ---
//! title: Guide
//! order: 1
//! ---
//!
//! # Guide
//! ```
//!
//! `title` and `order` are recognized; all other keys are retained as opaque
//! values. Malformed metadata never blocks rendering — it is logged and the
//! entire raw content is treated as the body.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Metadata parsed from a document's front matter block.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct FrontMatter {
    /// Page title, overriding H1 extraction.
    #[serde(default)]
    pub title: Option<String>,
    /// Sort position in listings; falls back to the configured default.
    #[serde(default)]
    pub order: Option<i64>,
    /// Unrecognized keys, passed through as opaque metadata.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Split a raw document into front matter and Markdown body.
///
/// Returns empty metadata with the full content as body when no front matter
/// block is present, when the closing fence is missing, or when the YAML is
/// malformed (logged as a warning).
#[must_use]
pub fn parse(raw: &str) -> (FrontMatter, &str) {
    let Some((yaml, body)) = split_fences(raw) else {
        return (FrontMatter::default(), raw);
    };

    if yaml.trim().is_empty() {
        return (FrontMatter::default(), body);
    }

    match serde_yaml::from_str::<FrontMatter>(yaml) {
        Ok(meta) => (meta, body),
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse front matter");
            (FrontMatter::default(), raw)
        }
    }
}

/// Extract the YAML block between leading `---` fences.
///
/// Returns `(yaml, body)` or `None` when the document has no complete block.
fn split_fences(raw: &str) -> Option<(&str, &str)> {
    let rest = raw.strip_prefix("---")?;
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    let rest = rest.strip_prefix('\n')?;

    for (offset, line) in line_spans(rest) {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body_start = offset + line.len();
            let body = rest[body_start..].strip_prefix('\n').unwrap_or(&rest[body_start..]);
            return Some((yaml, body));
        }
    }

    None
}

/// Iterate lines with their byte offsets, newline included in length.
fn line_spans(s: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    s.split_inclusive('\n').map(move |line| {
        let start = offset;
        offset += line.len();
        (start, line.trim_end_matches('\n'))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_title_and_order() {
        let raw = "---\ntitle: Guide\norder: 1\n---\n\n# Guide\n";
        let (meta, body) = parse(raw);
        assert_eq!(meta.title, Some("Guide".to_owned()));
        assert_eq!(meta.order, Some(1));
        assert_eq!(body, "\n# Guide\n");
    }

    #[test]
    fn test_no_front_matter() {
        let raw = "# Just a document\n";
        let (meta, body) = parse(raw);
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn test_extra_keys_retained() {
        let raw = "---\ntitle: Guide\nauthor: someone\ntags:\n  - a\n  - b\n---\nbody\n";
        let (meta, _) = parse(raw);
        assert_eq!(meta.title, Some("Guide".to_owned()));
        assert!(meta.extra.contains_key("author"));
        assert!(meta.extra.contains_key("tags"));
    }

    #[test]
    fn test_malformed_yaml_falls_back_to_raw() {
        let raw = "---\ntitle: [unclosed\n---\nbody\n";
        let (meta, body) = parse(raw);
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn test_non_integer_order_is_malformed() {
        let raw = "---\norder: not-a-number\n---\nbody\n";
        let (meta, body) = parse(raw);
        assert_eq!(meta.order, None);
        assert_eq!(body, raw);
    }

    #[test]
    fn test_missing_closing_fence() {
        let raw = "---\ntitle: Guide\n\n# Content\n";
        let (meta, body) = parse(raw);
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, raw);
    }

    #[test]
    fn test_empty_block() {
        let raw = "---\n---\nbody\n";
        let (meta, body) = parse(raw);
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_crlf_fences() {
        let raw = "---\r\ntitle: Guide\r\n---\r\nbody\r\n";
        let (meta, body) = parse(raw);
        assert_eq!(meta.title, Some("Guide".to_owned()));
        assert!(body.contains("body"));
    }

    #[test]
    fn test_dashes_later_in_document_are_not_front_matter() {
        let raw = "intro\n---\ntitle: nope\n---\n";
        let (meta, body) = parse(raw);
        assert_eq!(meta, FrontMatter::default());
        assert_eq!(body, raw);
    }
}

//! Link post-processing.
//!
//! Two rewrites run over rendered HTML:
//!
//! - external http(s) links are hardened with `rel="noopener noreferrer"` and
//!   `target="_blank"` (unless the author already set them)
//! - relative document links (`guide.md`, `./setup`) are rewritten to the
//!   canonical doc URL for the current version and locale
//!
//! Image tags pass through [`rewrite_images`] unchanged; the hook is where
//! asset-path rewriting would slot in.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static ANCHOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+[^>]*href="[^"]*"[^>]*>"#).expect("static pattern"));

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="([^"]*)""#).expect("static pattern"));

/// Build the canonical URL for a document.
#[must_use]
pub fn doc_url(route_prefix: &str, version: Option<&str>, locale: &str, slug: &str) -> String {
    match version {
        Some(version) => format!("/{route_prefix}/{version}/{locale}/{slug}"),
        None => format!("/{route_prefix}/{locale}/{slug}"),
    }
}

/// Rewrite anchors in rendered HTML.
///
/// `slug` is the current document's slug, used to resolve relative targets.
#[must_use]
pub fn rewrite_links(
    html: &str,
    locale: &str,
    slug: &str,
    version: Option<&str>,
    route_prefix: &str,
) -> String {
    ANCHOR_RE
        .replace_all(html, |caps: &Captures<'_>| {
            let tag = &caps[0];
            let Some(href_caps) = HREF_RE.captures(tag) else {
                return tag.to_owned();
            };
            let href = &href_caps[1];

            if href.starts_with("http://") || href.starts_with("https://") {
                return harden_external(tag);
            }

            if is_doc_link(href) {
                let target = resolve_relative_slug(href, slug);
                let url = doc_url(route_prefix, version, locale, &target);
                return tag.replacen(
                    &format!(r#"href="{href}""#),
                    &format!(r#"href="{url}""#),
                    1,
                );
            }

            tag.to_owned()
        })
        .into_owned()
}

/// Image tags pass through unchanged. This hook is the slot for rewriting
/// image sources to an asset route; keep it in the pipeline even as a no-op.
#[must_use]
pub fn rewrite_images(html: &str) -> String {
    html.to_owned()
}

/// Add `rel` and `target` to an external link unless already present.
fn harden_external(tag: &str) -> String {
    let mut tag = tag.to_owned();
    if !tag.contains("rel=") {
        tag = tag.replacen("<a ", r#"<a rel="noopener noreferrer" "#, 1);
    }
    if !tag.contains("target=") {
        tag = tag.replacen("<a ", r#"<a target="_blank" "#, 1);
    }
    tag
}

/// Whether a href points at another document.
///
/// Either an explicit `.md` link or a bare relative path (no scheme, no
/// leading slash or fragment, and no dot once a leading `./` is stripped).
fn is_doc_link(href: &str) -> bool {
    if href.ends_with(".md") {
        return true;
    }
    if href.starts_with('/') || href.starts_with('#') || href.contains(':') {
        return false;
    }
    let bare = href.trim_start_matches("./");
    !bare.is_empty() && !bare.contains('.')
}

/// Resolve a relative document link against the current slug.
///
/// The directory portion of the current slug (empty when the slug has no
/// `/`) is joined with the target, which has leading `./` and a trailing
/// `.md` stripped.
fn resolve_relative_slug(href: &str, current_slug: &str) -> String {
    let current_dir = current_slug
        .rsplit_once('/')
        .map_or("", |(dir, _)| dir);

    let target = href.trim_start_matches(|c| c == '.' || c == '/');
    let target = target.strip_suffix(".md").unwrap_or(target);

    let joined = if current_dir.is_empty() {
        target.to_owned()
    } else {
        format!("{current_dir}/{target}")
    };

    joined.trim_matches('/').to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_link_hardened() {
        let html = r#"<p><a href="https://example.com">ext</a></p>"#;
        let out = rewrite_links(html, "en", "guide", None, "docs");
        assert!(out.contains(r#"rel="noopener noreferrer""#));
        assert!(out.contains(r#"target="_blank""#));
        assert!(out.contains(r#"href="https://example.com""#));
    }

    #[test]
    fn test_external_link_existing_rel_kept() {
        let html = r#"<a rel="me" href="https://example.com">ext</a>"#;
        let out = rewrite_links(html, "en", "guide", None, "docs");
        assert!(out.contains(r#"rel="me""#));
        assert!(!out.contains("noopener"));
        assert!(out.contains(r#"target="_blank""#));
    }

    #[test]
    fn test_md_link_rewritten() {
        let html = r#"<a href="setup.md">setup</a>"#;
        let out = rewrite_links(html, "en", "guide", None, "docs");
        assert!(out.contains(r#"href="/docs/en/setup""#));
    }

    #[test]
    fn test_relative_md_link_uses_current_directory() {
        let html = r#"<a href="./install.md">install</a>"#;
        let out = rewrite_links(html, "en", "guides/setup", None, "docs");
        assert!(out.contains(r#"href="/docs/en/guides/install""#));
    }

    #[test]
    fn test_bare_relative_link_rewritten() {
        let html = r#"<a href="./install">install</a>"#;
        let out = rewrite_links(html, "en", "guide", None, "docs");
        assert!(out.contains(r#"href="/docs/en/install""#));
    }

    #[test]
    fn test_versioned_url() {
        let html = r#"<a href="setup.md">setup</a>"#;
        let out = rewrite_links(html, "en", "guide", Some("v2.0"), "docs");
        assert!(out.contains(r#"href="/docs/v2.0/en/setup""#));
    }

    #[test]
    fn test_fragment_link_untouched() {
        let html = r##"<a href="#section">jump</a>"##;
        let out = rewrite_links(html, "en", "guide", None, "docs");
        assert_eq!(out, html);
    }

    #[test]
    fn test_absolute_path_untouched() {
        let html = r#"<a href="/somewhere/else">x</a>"#;
        let out = rewrite_links(html, "en", "guide", None, "docs");
        assert_eq!(out, html);
    }

    #[test]
    fn test_mailto_untouched() {
        let html = r#"<a href="mailto:docs@example.com">mail</a>"#;
        let out = rewrite_links(html, "en", "guide", None, "docs");
        assert_eq!(out, html);
    }

    #[test]
    fn test_asset_link_untouched() {
        let html = r#"<a href="diagram.png">img</a>"#;
        let out = rewrite_links(html, "en", "guide", None, "docs");
        assert_eq!(out, html);
    }

    #[test]
    fn test_images_pass_through() {
        let html = r#"<img src="../assets/pic.png" alt="pic">"#;
        assert_eq!(rewrite_images(html), html);
    }

    #[test]
    fn test_doc_url() {
        assert_eq!(doc_url("docs", None, "en", "guide"), "/docs/en/guide");
        assert_eq!(
            doc_url("docs", Some("v1.0"), "ar", "guides/setup"),
            "/docs/v1.0/ar/guides/setup"
        );
    }
}

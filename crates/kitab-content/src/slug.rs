//! Slug and headline helpers.

/// Slugify text for use as a heading ID or URL segment.
///
/// Alphanumeric runs are lowercased and joined by single dashes; everything
/// else is a separator. Non-ASCII letters are kept, which preserves usable
/// anchors for localized headings.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Turn a filename stem into a human-readable title.
///
/// `getting-started` becomes `Getting Started`.
#[must_use]
pub fn headline(stem: &str) -> String {
    stem.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

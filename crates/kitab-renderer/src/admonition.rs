//! Admonition callout blocks.
//!
//! ```text
//! :::tip
//! Inner **Markdown** renders normally.
//! :::
//! ```
//!
//! renders as `<div class="admonition admonition-tip">...</div>`. The type is
//! a lowercase word (`tip`, `warning`, `danger`, ...); any word is accepted,
//! styling is the stylesheet's concern.

use std::collections::BTreeMap;

use regex::Regex;

use crate::extension::{BlockExtension, OpenedBlock};

/// Option key: class prefix for the emitted `<div>` (default `admonition`).
const CLASS_PREFIX_KEY: &str = "admonition_class_prefix";

/// Matcher for `:::<type>` callout blocks.
pub struct AdmonitionBlocks {
    open_re: Regex,
    class_prefix: String,
}

impl AdmonitionBlocks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            open_re: Regex::new(r"^:::\s*([a-z]+)\s*$").expect("static pattern"),
            class_prefix: "admonition".to_owned(),
        }
    }
}

impl Default for AdmonitionBlocks {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockExtension for AdmonitionBlocks {
    fn name(&self) -> &'static str {
        "admonition"
    }

    fn option_keys(&self) -> &'static [&'static str] {
        &[CLASS_PREFIX_KEY]
    }

    fn configure(&mut self, options: &BTreeMap<String, String>) {
        if let Some(prefix) = options.get(CLASS_PREFIX_KEY) {
            self.class_prefix = prefix.clone();
        }
    }

    fn try_open(&mut self, line: &str) -> Option<OpenedBlock> {
        // Indented openers are not block starts (consistent with code blocks)
        if line.starts_with(char::is_whitespace) {
            return None;
        }

        let caps = self.open_re.captures(line)?;
        let kind = caps.get(1).expect("group 1 always present").as_str();
        let prefix = &self.class_prefix;

        Some(OpenedBlock {
            opening_html: format!(r#"<div class="{prefix} {prefix}-{kind}">"#),
            closing_html: "</div>".to_owned(),
            closes: Box::new(is_closing_line),
        })
    }
}

/// A closing line is three or more colons and nothing else.
fn is_closing_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == ':')
}

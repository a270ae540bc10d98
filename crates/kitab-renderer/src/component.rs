//! Embeddable component blocks.
//!
//! A non-indented `<x-name attr="val">` line opens a component block that runs
//! until the matching `</x-name>` line. The block renders as the same tag with
//! its attributes preserved; inner lines remain ordinary Markdown.
//!
//! Two names are recognized as interactive widgets and get behavior hooks for
//! the client-side runtime: `tabs` and `accordion` receive a
//! `data-widget` attribute and a `<name>-container` class. The interactive
//! behavior itself lives entirely on the client.

use std::fmt::Write;

use regex::Regex;

use crate::extension::{BlockExtension, OpenedBlock};

/// Matcher for `<x-*>` component blocks.
pub struct ComponentBlocks {
    open_re: Regex,
    attr_re: Regex,
}

impl ComponentBlocks {
    #[must_use]
    pub fn new() -> Self {
        Self {
            open_re: Regex::new(r"^<x-([a-z0-9-]+)([^>]*)>\s*$").expect("static pattern"),
            attr_re: Regex::new(r#"([a-zA-Z0-9-]+)="([^"]*)""#).expect("static pattern"),
        }
    }

    fn opening_tag(&self, name: &str, attr_str: &str) -> String {
        let mut attrs: Vec<(String, String)> = self
            .attr_re
            .captures_iter(attr_str)
            .map(|c| (c[1].to_owned(), c[2].to_owned()))
            .collect();

        // Behavior hooks for the recognized interactive components
        if name == "tabs" || name == "accordion" {
            attrs.push(("data-widget".to_owned(), name.to_owned()));
            let container = format!("{name}-container");
            match attrs.iter_mut().find(|(k, _)| k == "class") {
                Some((_, class)) => {
                    class.push(' ');
                    class.push_str(&container);
                }
                None => attrs.push(("class".to_owned(), container)),
            }
        }

        let mut tag = format!("<x-{name}");
        for (key, value) in &attrs {
            write!(tag, r#" {key}="{value}""#).expect("writing to String");
        }
        tag.push('>');
        tag
    }
}

impl Default for ComponentBlocks {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockExtension for ComponentBlocks {
    fn name(&self) -> &'static str {
        "component"
    }

    fn try_open(&mut self, line: &str) -> Option<OpenedBlock> {
        if line.starts_with(char::is_whitespace) {
            return None;
        }

        let caps = self.open_re.captures(line)?;
        let name = caps.get(1).expect("group 1 always present").as_str();
        let attr_str = caps.get(2).map_or("", |m| m.as_str());

        let closing_tag = format!("</x-{name}>");
        Some(OpenedBlock {
            opening_html: self.opening_tag(name, attr_str),
            closing_html: closing_tag.clone(),
            closes: Box::new(move |l: &str| l.trim() == closing_tag),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extension::BlockProcessor;

    fn process(input: &str) -> String {
        let mut exts: Vec<Box<dyn BlockExtension>> = vec![Box::new(ComponentBlocks::new())];
        BlockProcessor::new(&mut exts).process(input)
    }

    #[test]
    fn test_plain_component_round_trips() {
        let out = process("<x-card title=\"Pricing\">\nBody text.\n</x-card>\n");
        assert!(out.contains(r#"<x-card title="Pricing">"#));
        assert!(out.contains("Body text."));
        assert!(out.contains("</x-card>"));
    }

    #[test]
    fn test_tabs_gets_behavior_hooks() {
        let out = process("<x-tabs>\ncontent\n</x-tabs>\n");
        assert!(out.contains(r#"data-widget="tabs""#));
        assert!(out.contains(r#"class="tabs-container""#));
    }

    #[test]
    fn test_accordion_gets_behavior_hooks() {
        let out = process("<x-accordion>\ncontent\n</x-accordion>\n");
        assert!(out.contains(r#"data-widget="accordion""#));
        assert!(out.contains(r#"class="accordion-container""#));
    }

    #[test]
    fn test_existing_class_is_extended() {
        let out = process("<x-tabs class=\"wide\">\ncontent\n</x-tabs>\n");
        assert!(out.contains(r#"class="wide tabs-container""#));
    }

    #[test]
    fn test_attributes_preserved() {
        let out = process("<x-tabs id=\"install\" lang=\"en\">\ncontent\n</x-tabs>\n");
        assert!(out.contains(r#"id="install""#));
        assert!(out.contains(r#"lang="en""#));
    }

    #[test]
    fn test_indented_tag_not_matched() {
        let out = process("  <x-tabs>\ncontent\n");
        assert!(!out.contains("data-widget"));
    }

    #[test]
    fn test_mismatched_close_does_not_end_block() {
        let mut exts: Vec<Box<dyn BlockExtension>> = vec![Box::new(ComponentBlocks::new())];
        let mut p = BlockProcessor::new(&mut exts);
        let _ = p.process("<x-tabs>\n</x-accordion>\n");
        assert_eq!(p.warnings().len(), 1);
    }

    #[test]
    fn test_nested_components() {
        let out = process("<x-tabs>\n<x-tab label=\"One\">\nfirst\n</x-tab>\n</x-tabs>\n");
        assert!(out.contains(r#"<x-tab label="One">"#));
        assert!(out.contains("</x-tab>"));
        assert!(out.contains("</x-tabs>"));
    }

    #[test]
    fn test_ordinary_html_not_matched() {
        let out = process("<div class=\"plain\">\n");
        assert_eq!(out, "<div class=\"plain\">\n");
    }
}

//! The Markdown engine and its two-phase builder.
//!
//! Construction happens in two phases:
//!
//! 1. **Registration**: block extensions are added via
//!    [`MarkdownEngineBuilder::register`]. Each extension exposes the option
//!    keys it accepts.
//! 2. **Options**: [`MarkdownEngineBuilder::build`] validates the collected
//!    options map against the union of accepted keys (engine core keys plus
//!    every extension's keys), then hands the validated map to each
//!    extension.
//!
//! This ordering guarantee replaces the fragile register-then-merge-config
//! sequencing the engine would otherwise need: no extension can observe
//! options before every extension has registered its schema.

use std::collections::BTreeMap;

use pulldown_cmark::{Options, Parser};

use crate::admonition::AdmonitionBlocks;
use crate::component::ComponentBlocks;
use crate::extension::{BlockExtension, BlockProcessor};
use crate::writer::HtmlWriter;

/// Engine core option: the symbol inside heading permalink anchors.
const PERMALINK_SYMBOL_KEY: &str = "permalink_symbol";

/// Error raised during engine construction.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An options key that neither the engine core nor any registered
    /// extension accepts.
    #[error("unknown engine option: {0}")]
    UnknownOption(String),
}

/// Result of rendering a Markdown document.
#[derive(Debug)]
pub struct RenderOutput {
    /// Rendered HTML.
    pub html: String,
    /// Warnings generated while processing (e.g., unclosed extension blocks).
    pub warnings: Vec<String>,
}

/// Markdown-to-HTML engine with GFM extensions and custom block syntax.
///
/// Create via [`MarkdownEngine::builder`]. The engine is reusable across
/// documents; per-document state lives in the per-render processor.
pub struct MarkdownEngine {
    extensions: Vec<Box<dyn BlockExtension>>,
    permalink_symbol: String,
}

impl MarkdownEngine {
    /// Start building an engine with the standard extensions (admonitions
    /// and components) pre-registered.
    #[must_use]
    pub fn builder() -> MarkdownEngineBuilder {
        MarkdownEngineBuilder::new()
            .register(AdmonitionBlocks::new())
            .register(ComponentBlocks::new())
    }

    /// Render a Markdown document to HTML.
    pub fn render(&mut self, markdown: &str) -> RenderOutput {
        let mut processor = BlockProcessor::new(&mut self.extensions);
        let preprocessed = processor.process(markdown);
        let warnings = processor.warnings().to_vec();

        let options = Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(&preprocessed, options);
        let html = HtmlWriter::new(&self.permalink_symbol).run(parser);

        RenderOutput { html, warnings }
    }
}

/// Two-phase builder for [`MarkdownEngine`].
pub struct MarkdownEngineBuilder {
    extensions: Vec<Box<dyn BlockExtension>>,
    options: BTreeMap<String, String>,
}

impl MarkdownEngineBuilder {
    /// Start with no extensions registered.
    #[must_use]
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
            options: BTreeMap::new(),
        }
    }

    /// Register a block extension. Matchers are tried in registration order.
    #[must_use]
    pub fn register<E: BlockExtension + 'static>(mut self, extension: E) -> Self {
        self.extensions.push(Box::new(extension));
        self
    }

    /// Set a single option. Validated at [`build`](Self::build) time.
    #[must_use]
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Validate options against the union of accepted keys and build the
    /// engine.
    pub fn build(mut self) -> Result<MarkdownEngine, EngineError> {
        for key in self.options.keys() {
            let accepted = key == PERMALINK_SYMBOL_KEY
                || self
                    .extensions
                    .iter()
                    .any(|ext| ext.option_keys().contains(&key.as_str()));
            if !accepted {
                return Err(EngineError::UnknownOption(key.clone()));
            }
        }

        for ext in &mut self.extensions {
            ext.configure(&self.options);
        }

        let permalink_symbol = self
            .options
            .get(PERMALINK_SYMBOL_KEY)
            .cloned()
            .unwrap_or_else(|| "#".to_owned());

        Ok(MarkdownEngine {
            extensions: self.extensions,
            permalink_symbol,
        })
    }
}

impl Default for MarkdownEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

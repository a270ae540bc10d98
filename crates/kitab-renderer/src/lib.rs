//! Markdown-to-HTML engine with pluggable block extensions.
//!
//! This crate converts CommonMark + GFM markdown to HTML. Custom block
//! syntax (admonition callouts, embeddable `<x-*>` components) is handled by
//! a line-based preprocessor with a registry of [`BlockExtension`] matchers
//! tried in priority order; each matcher owns its own closing-condition
//! predicate. The preprocessed markdown is then rendered by an event-driven
//! HTML writer.
//!
//! # Two-phase construction
//!
//! [`MarkdownEngineBuilder`] separates extension registration from option
//! application: extensions are registered first (each exposing the option
//! keys it accepts), then the options map is validated against the union of
//! accepted keys and applied. Extensions never observe options before
//! registration completes.
//!
//! # Example
//!
//! ```
//! use kitab_renderer::MarkdownEngine;
//!
//! let mut engine = MarkdownEngine::builder().build().unwrap();
//! let output = engine.render("# Hello\n\n:::tip\nBe **bold**.\n:::");
//! assert!(output.html.contains(r#"class="admonition admonition-tip""#));
//! assert!(output.html.contains("<strong>bold</strong>"));
//! ```

mod admonition;
mod component;
mod engine;
mod escape;
mod extension;
mod fence;
mod writer;

pub use admonition::AdmonitionBlocks;
pub use component::ComponentBlocks;
pub use engine::{EngineError, MarkdownEngine, MarkdownEngineBuilder, RenderOutput};
pub use escape::escape_html;
pub use extension::{BlockExtension, BlockProcessor, OpenedBlock};

//! Pluggable block extensions for custom Markdown syntax.
//!
//! Extensions are tried in registration (priority) order against each line of
//! the source document. An extension that recognizes a block opener returns an
//! [`OpenedBlock`] carrying the opening HTML, the closing HTML, and a
//! predicate that recognizes the block's closing line. The processor keeps a
//! stack of opened blocks, so extensions of different kinds (and repeated uses
//! of the same kind) nest freely.
//!
//! Emitted HTML fragments are surrounded by blank lines so the lines between
//! opener and closer remain ordinary Markdown — block and inline content
//! inside an extension block is rendered normally.

use std::collections::BTreeMap;

use crate::fence::FenceTracker;

/// Predicate recognizing the closing line of an opened block.
pub type CloseFn = Box<dyn Fn(&str) -> bool + Send>;

/// A block opened by an extension matcher.
///
/// The matcher that opened the block owns its closing condition: the
/// processor calls `closes` on each subsequent line and emits `closing_html`
/// when it matches.
pub struct OpenedBlock {
    /// HTML emitted in place of the opening line.
    pub opening_html: String,
    /// HTML emitted in place of the closing line.
    pub closing_html: String,
    /// Recognizes the line that closes this block.
    pub closes: CloseFn,
}

/// A custom block syntax handler.
///
/// Implementations recognize a block-opening line and describe how the block
/// opens, closes, and what HTML wraps it. Matchers are tried in registration
/// order; the first to return `Some` wins the line.
pub trait BlockExtension: Send {
    /// Extension name, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Option keys this extension accepts from the engine options map.
    fn option_keys(&self) -> &'static [&'static str] {
        &[]
    }

    /// Apply validated options. Called once, after all extensions are
    /// registered and the options map has been validated.
    fn configure(&mut self, _options: &BTreeMap<String, String>) {}

    /// Try to open a block at this line.
    fn try_open(&mut self, line: &str) -> Option<OpenedBlock>;
}

/// Line-based preprocessor applying registered [`BlockExtension`]s.
///
/// Produces Markdown in which recognized extension blocks have been replaced
/// by their wrapping HTML, leaving inner content for the Markdown renderer.
/// One processor handles one document; fence state and warnings are per-run.
pub struct BlockProcessor<'a> {
    extensions: &'a mut [Box<dyn BlockExtension>],
    fence: FenceTracker,
    warnings: Vec<String>,
}

impl<'a> BlockProcessor<'a> {
    /// Create a processor over a registered extension set.
    pub fn new(extensions: &'a mut [Box<dyn BlockExtension>]) -> Self {
        Self {
            extensions,
            fence: FenceTracker::new(),
            warnings: Vec::new(),
        }
    }

    /// Preprocess a Markdown document.
    #[must_use]
    pub fn process(&mut self, input: &str) -> String {
        let mut output = String::with_capacity(input.len());
        let mut stack: Vec<OpenedBlock> = Vec::new();

        for line in input.lines() {
            self.fence.update(line);
            if self.fence.in_fence() {
                output.push_str(line);
                output.push('\n');
                continue;
            }

            // Innermost open block gets first say on its closing line.
            if let Some(top) = stack.last()
                && (top.closes)(line)
            {
                let block = stack.pop().expect("stack checked non-empty");
                // Blank lines around the fragment keep surrounding Markdown intact
                output.push('\n');
                output.push_str(&block.closing_html);
                output.push('\n');
                continue;
            }

            if let Some(block) = self.try_open(line) {
                output.push_str(&block.opening_html);
                output.push_str("\n\n");
                stack.push(block);
                continue;
            }

            output.push_str(line);
            output.push('\n');
        }

        for _ in stack.drain(..) {
            self.warnings
                .push("unclosed extension block (missing closing line)".to_owned());
        }

        output
    }

    fn try_open(&mut self, line: &str) -> Option<OpenedBlock> {
        self.extensions
            .iter_mut()
            .find_map(|ext| ext.try_open(line))
    }

    /// Warnings accumulated while processing (e.g., unclosed blocks).
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Toy extension: `!!!` opens, `!!!` closes.
    struct Bang;

    impl BlockExtension for Bang {
        fn name(&self) -> &'static str {
            "bang"
        }

        fn try_open(&mut self, line: &str) -> Option<OpenedBlock> {
            (line.trim() == "!!!").then(|| OpenedBlock {
                opening_html: "<div class=\"bang\">".to_owned(),
                closing_html: "</div>".to_owned(),
                closes: Box::new(|l: &str| l.trim() == "!!!"),
            })
        }
    }

    fn bang() -> Vec<Box<dyn BlockExtension>> {
        vec![Box::new(Bang)]
    }

    #[test]
    fn test_open_and_close() {
        let mut exts = bang();
        let out = BlockProcessor::new(&mut exts).process("!!!\ncontent\n!!!\n");
        assert!(out.contains("<div class=\"bang\">"));
        assert!(out.contains("content"));
        assert!(out.contains("</div>"));
    }

    #[test]
    fn test_fragments_surrounded_by_blank_lines() {
        let mut exts = bang();
        let out = BlockProcessor::new(&mut exts).process("!!!\ncontent\n!!!\n");
        assert!(out.contains("<div class=\"bang\">\n\ncontent"));
        assert!(out.contains("content\n\n</div>"));
    }

    #[test]
    fn test_unclosed_block_warns() {
        let mut exts = bang();
        let mut p = BlockProcessor::new(&mut exts);
        let _ = p.process("!!!\ncontent\n");
        assert_eq!(p.warnings().len(), 1);
        assert!(p.warnings()[0].contains("unclosed"));
    }

    #[test]
    fn test_syntax_inside_fence_untouched() {
        let mut exts = bang();
        let out = BlockProcessor::new(&mut exts).process("```\n!!!\n```\n");
        assert!(out.contains("!!!"));
        assert!(!out.contains("<div"));
    }

    #[test]
    fn test_unrecognized_lines_pass_through() {
        let mut exts = bang();
        let out = BlockProcessor::new(&mut exts).process("plain paragraph\n");
        assert_eq!(out, "plain paragraph\n");
    }
}

//! Code fence tracking for the block-extension preprocessor.
//!
//! Extension syntax (`:::` lines, `<x-*>` tags) that appears inside a fenced
//! code block must be left untouched. This tracker follows CommonMark fence
//! rules: three or more backticks or tildes open a fence, and the closing
//! fence must use the same character and be at least as long.

/// Tracks fenced code block state during line-by-line processing.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<(char, usize)>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the current position is inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed one line and update the fence state.
    pub(crate) fn update(&mut self, line: &str) {
        let trimmed = line.trim_start();

        match self.open {
            Some((ch, len)) => {
                if closes_fence(trimmed, ch, len) {
                    self.open = None;
                }
            }
            None => {
                self.open = opens_fence(trimmed);
            }
        }
    }
}

fn opens_fence(trimmed: &str) -> Option<(char, usize)> {
    let ch = trimmed.chars().next().filter(|&c| c == '`' || c == '~')?;
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    (len >= 3).then_some((ch, len))
}

fn closes_fence(trimmed: &str, ch: char, min_len: usize) -> bool {
    let len = trimmed.chars().take_while(|&c| c == ch).count();
    len >= min_len && trimmed[len..].chars().all(char::is_whitespace)
}

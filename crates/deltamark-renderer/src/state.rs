//! Per-render state for block emission.

use deltamark_delta::HeadingLevel;

/// Open heading blocks and the resolution status of the current line.
///
/// Lives for a single render. The stack is empty at the start and, once
/// [`drain`](Self::drain) has run, at the end.
#[derive(Debug, Default)]
pub(crate) struct BlockState {
    /// Headings opened and not yet closed.
    open: Vec<HeadingLevel>,
    /// Whether the current line's attributes were already looked up.
    line_resolved: bool,
}

impl BlockState {
    /// Mark the current line as resolved. Returns `true` the first time per line.
    pub(crate) fn claim_line(&mut self) -> bool {
        !std::mem::replace(&mut self.line_resolved, true)
    }

    /// Start a new line.
    pub(crate) fn next_line(&mut self) {
        self.line_resolved = false;
    }

    /// Record an opened heading.
    pub(crate) fn push(&mut self, level: HeadingLevel) {
        self.open.push(level);
    }

    /// Remove the most recently opened heading.
    pub(crate) fn pop(&mut self) -> Option<HeadingLevel> {
        self.open.pop()
    }

    /// Remove all open headings, most recent first.
    pub(crate) fn drain(&mut self) -> impl Iterator<Item = HeadingLevel> + '_ {
        self.open.drain(..).rev()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

//! Render backend trait for format-specific rendering.
//!
//! This trait abstracts the differences between HTML and Markdown output,
//! allowing the delta renderer to be generic over the output format.

use std::borrow::Cow;

use deltamark_delta::HeadingLevel;

use crate::inline::InlineFormat;

/// Backend trait for format-specific rendering operations.
///
/// Implementations provide:
/// - Inline wraps (HTML uses `<strong>`, Markdown uses `**`)
/// - Heading open/close (HTML uses `<hN>` pairs, Markdown a `#` prefix)
/// - Encoding of leading spaces
/// - The separator emitted at a line break
pub trait RenderBackend {
    /// Whether a run reverses its nesting order when the next run shares one
    /// of its formats.
    ///
    /// - `true` (Markdown): keeps adjacent same-format markers apart.
    /// - `false` (HTML): tags never merge.
    const REVERSE_ON_SHARED_FORMAT: bool;

    /// Wrap `inner` in one inline format.
    fn wrap(format: InlineFormat, inner: &str, out: &mut String);

    /// Encode `count` leading spaces of a run.
    fn leading_spaces(count: usize, out: &mut String);

    /// Open a heading block that spans the rest of the line.
    fn heading_open(level: HeadingLevel, out: &mut String);

    /// Close a heading block opened with [`heading_open`](Self::heading_open).
    ///
    /// Default emits nothing.
    fn heading_close(_level: HeadingLevel, _out: &mut String) {}

    /// Wrap a single run whose own attributes carry a heading level.
    fn heading_run(level: HeadingLevel, inner: &str, out: &mut String) {
        Self::heading_open(level, out);
        out.push_str(inner);
        Self::heading_close(level, out);
    }

    /// Render the separator that ends a line.
    fn paragraph_break(out: &mut String);

    /// Escape run text when escaping is enabled.
    ///
    /// Default returns the text unchanged.
    #[must_use]
    fn escape_text(text: &str) -> Cow<'_, str> {
        Cow::Borrowed(text)
    }
}

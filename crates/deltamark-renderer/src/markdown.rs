//! Markdown backend for delta rendering.

use deltamark_delta::HeadingLevel;

use crate::backend::RenderBackend;
use crate::inline::InlineFormat;

/// Heading prefixes indexed by `level - 1`.
///
/// Levels 5 and 6 share a prefix; existing consumers depend on this output.
const HEADING_PREFIXES: [&str; 6] = ["#", "##", "###", "####", "######", "######"];

/// Markdown render backend.
///
/// Produces `**bold**`, `_italic_`, `~~strike~~`, `#` heading prefixes, and
/// blank-line paragraph separation.
pub struct MarkdownBackend;

impl RenderBackend for MarkdownBackend {
    const REVERSE_ON_SHARED_FORMAT: bool = true;

    fn wrap(format: InlineFormat, inner: &str, out: &mut String) {
        let marker = match format {
            InlineFormat::Strike => "~~",
            InlineFormat::Italic => "_",
            InlineFormat::Bold => "**",
        };
        out.push_str(marker);
        out.push_str(inner);
        out.push_str(marker);
    }

    fn leading_spaces(count: usize, out: &mut String) {
        out.push_str(&" ".repeat(count));
    }

    fn heading_open(level: HeadingLevel, out: &mut String) {
        out.push_str(HEADING_PREFIXES[usize::from(level.get() - 1)]);
        out.push(' ');
    }

    fn paragraph_break(out: &mut String) {
        out.push_str("\n\n");
    }
}

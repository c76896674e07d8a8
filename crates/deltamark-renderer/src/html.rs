//! HTML backend for delta rendering.
//!
//! Produces inline HTML fragments suitable for a live preview pane.

use std::borrow::Cow;
use std::fmt::Write;

use deltamark_delta::HeadingLevel;

use crate::backend::RenderBackend;
use crate::inline::InlineFormat;

/// HTML render backend.
///
/// Produces:
/// - `<s>`, `<em>`, `<strong>` for strike, italic, bold
/// - `<h1>`-`<h6>` around heading lines
/// - `&nbsp;` for each leading space of a run
///
/// Plain lines are not wrapped and line breaks emit nothing.
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    const REVERSE_ON_SHARED_FORMAT: bool = false;

    fn wrap(format: InlineFormat, inner: &str, out: &mut String) {
        let tag = match format {
            InlineFormat::Strike => "s",
            InlineFormat::Italic => "em",
            InlineFormat::Bold => "strong",
        };
        write!(out, "<{tag}>{inner}</{tag}>").unwrap();
    }

    fn leading_spaces(count: usize, out: &mut String) {
        out.push_str(&"&nbsp;".repeat(count));
    }

    fn heading_open(level: HeadingLevel, out: &mut String) {
        write!(out, "<h{level}>").unwrap();
    }

    fn heading_close(level: HeadingLevel, out: &mut String) {
        write!(out, "</h{level}>").unwrap();
    }

    fn paragraph_break(_out: &mut String) {}

    fn escape_text(text: &str) -> Cow<'_, str> {
        if text.contains(['&', '<', '>', '"', '\'']) {
            Cow::Owned(escape_html(text))
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

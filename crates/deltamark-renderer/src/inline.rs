//! Inline formatting of a single text run.

use deltamark_delta::{AttributeMap, HeadingLevel};

use crate::backend::RenderBackend;
use crate::error::RenderError;

/// Inline format applied to a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InlineFormat {
    Strike,
    Italic,
    Bold,
}

impl InlineFormat {
    /// Nesting order, outermost first.
    pub const NESTING: [Self; 3] = [Self::Strike, Self::Italic, Self::Bold];

    /// Whether this format is switched on in `attrs`.
    #[must_use]
    pub fn is_set(self, attrs: &AttributeMap) -> bool {
        match self {
            Self::Strike => attrs.strike,
            Self::Italic => attrs.italic,
            Self::Bold => attrs.bold,
        }
    }
}

/// Formats switched on in `attrs`, outermost first.
#[must_use]
pub fn active_formats(attrs: &AttributeMap) -> Vec<InlineFormat> {
    InlineFormat::NESTING
        .into_iter()
        .filter(|format| format.is_set(attrs))
        .collect()
}

/// Split `text` into leading space count, core, and trailing spaces.
fn split_spaces(text: &str) -> (usize, &str, &str) {
    let rest = text.trim_start_matches(' ');
    let leading = text.len() - rest.len();
    let core = rest.trim_end_matches(' ');
    (leading, core, &rest[core.len()..])
}

/// Format one run of text with its attributes.
///
/// Leading and trailing spaces are kept outside the markup, except that the
/// trailing spaces ride inside the innermost wrap. `adjacent` is the next
/// operation's attributes; backends with
/// [`REVERSE_ON_SHARED_FORMAT`](RenderBackend::REVERSE_ON_SHARED_FORMAT)
/// reverse the nesting order when it shares a format with this run.
///
/// A `header` attribute on the run itself wraps outside all inline formats.
///
/// # Errors
///
/// Returns [`RenderError::Attribute`] when the run's own `header` is malformed.
pub fn format_run<B: RenderBackend>(
    text: &str,
    attrs: &AttributeMap,
    adjacent: Option<&AttributeMap>,
) -> Result<String, RenderError> {
    let heading = attrs.heading()?;
    Ok(compose::<B>(text, attrs, adjacent, heading))
}

/// Compose a run with an already resolved run-level heading.
pub(crate) fn compose<B: RenderBackend>(
    text: &str,
    attrs: &AttributeMap,
    adjacent: Option<&AttributeMap>,
    heading: Option<HeadingLevel>,
) -> String {
    let (leading, core, trailing) = split_spaces(text);

    let mut out = String::with_capacity(text.len() + 32);
    B::leading_spaces(leading, &mut out);
    if core.is_empty() {
        out.push_str(trailing);
        return out;
    }

    let mut formats = active_formats(attrs);
    if B::REVERSE_ON_SHARED_FORMAT
        && adjacent.is_some_and(|next| formats.iter().any(|format| format.is_set(next)))
    {
        formats.reverse();
    }

    let mut pending = trailing;
    let mut body = core.to_owned();
    for format in formats.iter().rev() {
        let mut inner = std::mem::take(&mut body);
        inner.push_str(pending);
        pending = "";
        B::wrap(*format, &inner, &mut body);
    }
    if let Some(level) = heading {
        let mut inner = std::mem::take(&mut body);
        inner.push_str(pending);
        pending = "";
        B::heading_run(level, &inner, &mut body);
    }

    out.push_str(&body);
    out.push_str(pending);
    out
}

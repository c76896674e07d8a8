//! Delta renderer with pluggable backends.
//!
//! This crate provides a generic [`DeltaRenderer`] that turns a rich-text
//! [`Delta`] into HTML or Markdown using the [`RenderBackend`] trait.
//!
//! # Architecture
//!
//! The renderer uses a trait-based abstraction to handle format-specific differences:
//! - [`HtmlBackend`]: `<strong>`/`<em>`/`<s>` wraps, `<hN>` heading blocks
//! - [`MarkdownBackend`]: `**`/`_`/`~~` markers, `#` heading prefixes
//!
//! Run splitting, line-attribute lookahead and inline nesting are shared by
//! the generic renderer, while markup and line separators are delegated to
//! the backend.
//!
//! # Example
//!
//! ```
//! use deltamark_delta::{AttributeMap, Delta, Op};
//! use deltamark_renderer::{render_html, render_markdown};
//!
//! let delta = Delta::new(vec![
//!     Op::text_insert("Hello "),
//!     Op::text_insert("world").with_attributes(AttributeMap::new().with_bold()),
//!     Op::line_break(),
//! ]);
//! assert_eq!(render_html(Some(&delta)), "Hello <strong>world</strong>");
//! assert_eq!(render_markdown(Some(&delta)), "Hello **world**\n\n");
//! ```

mod backend;
mod error;
mod html;
mod inline;
mod markdown;
mod renderer;
mod scan;
mod state;

pub use backend::RenderBackend;
pub use deltamark_delta::Delta;
pub use error::RenderError;
pub use html::{HtmlBackend, escape_html};
pub use inline::{InlineFormat, active_formats, format_run};
pub use markdown::MarkdownBackend;
pub use renderer::{DeltaRenderer, HtmlRenderer, MarkdownRenderer, RenderResult};
pub use scan::line_attributes_after;

/// Render a delta as HTML. `None` renders to an empty string.
#[must_use]
pub fn render_html(delta: Option<&Delta>) -> String {
    delta
        .map(|delta| HtmlRenderer::new().render(delta).output)
        .unwrap_or_default()
}

/// Render a delta as Markdown. `None` renders to an empty string.
#[must_use]
pub fn render_markdown(delta: Option<&Delta>) -> String {
    delta
        .map(|delta| MarkdownRenderer::new().render(delta).output)
        .unwrap_or_default()
}

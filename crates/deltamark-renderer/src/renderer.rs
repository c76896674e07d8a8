//! Generic delta renderer with pluggable backend.

use std::borrow::Cow;
use std::marker::PhantomData;

use deltamark_delta::{AttributeMap, Delta, Op};

use crate::backend::RenderBackend;
use crate::error::RenderError;
use crate::html::HtmlBackend;
use crate::inline::{compose, format_run};
use crate::markdown::MarkdownBackend;
use crate::scan::line_attributes_after;
use crate::state::BlockState;

/// Result of rendering a delta.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered HTML or Markdown.
    pub output: String,
    /// Decorations skipped because of malformed attributes.
    pub warnings: Vec<String>,
}

/// Delta renderer rendering HTML.
pub type HtmlRenderer = DeltaRenderer<HtmlBackend>;

/// Delta renderer rendering Markdown.
pub type MarkdownRenderer = DeltaRenderer<MarkdownBackend>;

/// Generic delta renderer with pluggable backend.
///
/// Walks the operations once. Text runs are formatted inline, line breaks
/// close heading blocks, and line attributes are found by scanning ahead to
/// the line's terminating `"\n"` insert. Format-specific output is delegated
/// to the [`RenderBackend`].
///
/// The renderer only holds options; every call to [`render`](Self::render)
/// starts from fresh state.
pub struct DeltaRenderer<B: RenderBackend> {
    escape: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> DeltaRenderer<B> {
    /// Create a new renderer with escaping disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            escape: false,
            _backend: PhantomData,
        }
    }

    /// Enable or disable escaping of run text.
    ///
    /// Only the HTML backend escapes anything.
    #[must_use]
    pub fn with_escaping(mut self, enabled: bool) -> Self {
        self.escape = enabled;
        self
    }

    /// Render a delta and return the result.
    pub fn render(&self, delta: &Delta) -> RenderResult {
        let mut pass = RenderPass::<B> {
            ops: delta.ops(),
            escape: self.escape,
            output: String::with_capacity(1024),
            blocks: BlockState::default(),
            warnings: Vec::new(),
            _backend: PhantomData,
        };
        pass.run();

        RenderResult {
            output: pass.output,
            warnings: pass.warnings,
        }
    }
}

impl<B: RenderBackend> Default for DeltaRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one render call.
struct RenderPass<'a, B: RenderBackend> {
    ops: &'a [Op],
    escape: bool,
    output: String,
    blocks: BlockState,
    warnings: Vec<String>,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> RenderPass<'_, B> {
    fn run(&mut self) {
        let ops = self.ops;
        for (index, op) in ops.iter().enumerate() {
            let Some(text) = op.text() else {
                tracing::debug!(op = index, "Skipping embed insert");
                continue;
            };

            if text == "\n" {
                self.line_break();
            } else if text.contains('\n') {
                let mut segments = text.split('\n');
                let last = segments.next_back().unwrap_or_default();
                for segment in segments.filter(|s| !s.is_empty()) {
                    self.push_run(index, segment, op.attributes(), None);
                    B::paragraph_break(&mut self.output);
                }
                self.blocks.next_line();
                if !last.is_empty() {
                    self.push_line_run(index, last);
                }
            } else if !text.is_empty() {
                self.push_line_run(index, text);
            }
        }

        for level in self.blocks.drain() {
            B::heading_close(level, &mut self.output);
        }
    }

    /// Close the current line's block and emit the separator.
    fn line_break(&mut self) {
        if let Some(level) = self.blocks.pop() {
            B::heading_close(level, &mut self.output);
        }
        B::paragraph_break(&mut self.output);
        self.blocks.next_line();
    }

    /// Emit a run that may be the first of a heading line.
    fn push_line_run(&mut self, index: usize, text: &str) {
        let ops = self.ops;
        if self.blocks.claim_line()
            && let Some(line_attrs) = line_attributes_after(ops, index)
        {
            match line_attrs.heading() {
                Ok(Some(level)) => {
                    B::heading_open(level, &mut self.output);
                    self.blocks.push(level);
                }
                Ok(None) => {}
                Err(err) => self.warn(index, &err.into()),
            }
        }

        let adjacent = ops.get(index + 1).map(Op::attributes);
        self.push_run(index, text, ops[index].attributes(), adjacent);
    }

    /// Format and emit one run, falling back to no run-level heading on error.
    fn push_run(
        &mut self,
        index: usize,
        text: &str,
        attrs: &AttributeMap,
        adjacent: Option<&AttributeMap>,
    ) {
        let text = if self.escape {
            B::escape_text(text)
        } else {
            Cow::Borrowed(text)
        };

        let formatted = match format_run::<B>(&text, attrs, adjacent) {
            Ok(formatted) => formatted,
            Err(err) => {
                self.warn(index, &err);
                compose::<B>(&text, attrs, adjacent, None)
            }
        };
        self.output.push_str(&formatted);
    }

    fn warn(&mut self, index: usize, err: &RenderError) {
        tracing::warn!(op = index, error = %err, "Skipping malformed decoration");
        self.warnings.push(format!("op {index}: {err}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render_html, render_markdown};
    use deltamark_delta::Insert;
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Event, Options, Parser, Tag};

    fn text(s: &str) -> Op {
        Op::text_insert(s)
    }

    fn styled(s: &str, attrs: AttributeMap) -> Op {
        Op::text_insert(s).with_attributes(attrs)
    }

    fn heading_break(level: i64) -> Op {
        Op::line_break().with_attributes(AttributeMap::new().with_header(level))
    }

    fn html(ops: Vec<Op>) -> String {
        render_html(Some(&Delta::new(ops)))
    }

    fn md(ops: Vec<Op>) -> String {
        render_markdown(Some(&Delta::new(ops)))
    }

    #[test]
    fn test_no_delta_renders_empty() {
        assert_eq!(render_html(None), "");
        assert_eq!(render_markdown(None), "");
    }

    #[test]
    fn test_empty_delta_renders_empty() {
        assert_eq!(html(vec![]), "");
        assert_eq!(md(vec![]), "");
    }

    #[test]
    fn test_plain_text_verbatim() {
        let ops = || vec![text("Hello "), text("plain "), text("world")];
        assert_eq!(html(ops()), "Hello plain world");
        assert_eq!(md(ops()), "Hello plain world");
    }

    #[test]
    fn test_hello_world() {
        let ops = || {
            vec![
                text("Hello "),
                styled("world", AttributeMap::new().with_bold()),
                Op::line_break(),
            ]
        };
        assert_eq!(html(ops()), "Hello <strong>world</strong>");
        assert_eq!(md(ops()), "Hello **world**\n\n");
    }

    #[test]
    fn test_all_formats_nest() {
        let attrs = AttributeMap::new().with_bold().with_italic().with_strike();
        assert_eq!(
            html(vec![styled("TEXT", attrs.clone())]),
            "<s><em><strong>TEXT</strong></em></s>"
        );
        assert_eq!(md(vec![styled("TEXT", attrs)]), "~~_**TEXT**_~~");
    }

    #[test]
    fn test_heading_line() {
        let ops = || vec![text("Title"), heading_break(1)];
        assert_eq!(html(ops()), "<h1>Title</h1>");
        assert_eq!(md(ops()), "# Title\n\n");
    }

    #[test]
    fn test_line_break_only() {
        assert_eq!(html(vec![Op::line_break()]), "");
        assert_eq!(md(vec![Op::line_break()]), "\n\n");
    }

    #[test]
    fn test_heading_opens_once_per_line() {
        let ops = || {
            vec![
                text("Hello "),
                styled("world", AttributeMap::new().with_bold()),
                heading_break(2),
            ]
        };
        assert_eq!(html(ops()), "<h2>Hello <strong>world</strong></h2>");
        assert_eq!(md(ops()), "## Hello **world**\n\n");
    }

    #[test]
    fn test_heading_on_second_line() {
        let ops = || vec![text("One"), Op::line_break(), text("Two"), heading_break(2)];
        assert_eq!(html(ops()), "One<h2>Two</h2>");
        assert_eq!(md(ops()), "One\n\n## Two\n\n");
    }

    #[test]
    fn test_consecutive_headings() {
        let ops = || vec![text("A"), heading_break(1), text("B"), heading_break(3)];
        assert_eq!(html(ops()), "<h1>A</h1><h3>B</h3>");
        assert_eq!(md(ops()), "# A\n\n### B\n\n");
    }

    #[test]
    fn test_heading_levels_five_and_six_share_prefix() {
        assert_eq!(md(vec![text("Five"), heading_break(5)]), "###### Five\n\n");
        assert_eq!(md(vec![text("Six"), heading_break(6)]), "###### Six\n\n");
        assert_eq!(html(vec![text("Five"), heading_break(5)]), "<h5>Five</h5>");
    }

    #[test]
    fn test_embedded_newlines_split() {
        let ops = || vec![text("a\nb\nc")];
        assert_eq!(html(ops()), "abc");
        assert_eq!(md(ops()), "a\n\nb\n\nc");
    }

    #[test]
    fn test_embedded_newline_then_heading() {
        let ops = || vec![text("Intro\nTitle"), heading_break(1), text("Body")];
        assert_eq!(html(ops()), "Intro<h1>Title</h1>Body");
        assert_eq!(md(ops()), "Intro\n\n# Title\n\nBody");
    }

    #[test]
    fn test_empty_segments_skipped() {
        assert_eq!(md(vec![text("a\n\nb")]), "a\n\nb");
        assert_eq!(md(vec![text("a\n")]), "a\n\n");
        assert_eq!(md(vec![text("\nb")]), "b");
    }

    #[test]
    fn test_leading_newline_starts_new_line() {
        let ops = || vec![text("x"), text("\nTitle"), heading_break(1)];
        assert_eq!(html(ops()), "x<h1>Title</h1>");
        assert_eq!(md(ops()), "x# Title\n\n");
    }

    #[test]
    fn test_scan_stops_at_embedded_newline() {
        let ops = || vec![text("A"), text("B\nC"), heading_break(1)];
        assert_eq!(html(ops()), "AB<h1>C</h1>");
        assert_eq!(md(ops()), "AB\n\n# C\n\n");
    }

    #[test]
    fn test_unterminated_final_line() {
        assert_eq!(html(vec![text("Title")]), "Title");
        assert_eq!(md(vec![text("Title")]), "Title");
    }

    #[test]
    fn test_malformed_heading_emits_text() {
        let delta = Delta::new(vec![
            styled("Title", AttributeMap::new().with_italic()),
            heading_break(9),
        ]);

        let result = HtmlRenderer::new().render(&delta);
        assert_eq!(result.output, "<em>Title</em>");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("invalid heading level 9"));

        let result = MarkdownRenderer::new().render(&delta);
        assert_eq!(result.output, "_Title_\n\n");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_malformed_heading_warns_once_per_line() {
        let delta = Delta::new(vec![text("a"), text("b"), heading_break(0)]);
        let result = HtmlRenderer::new().render(&delta);
        assert_eq!(result.output, "ab");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_malformed_heading_does_not_abort_rest() {
        let ops = || {
            vec![
                text("Bad"),
                heading_break(42),
                text("Good"),
                heading_break(2),
            ]
        };
        assert_eq!(html(ops()), "Bad<h2>Good</h2>");
        assert_eq!(md(ops()), "Bad\n\n## Good\n\n");
    }

    #[test]
    fn test_non_numeric_heading_from_json() {
        let delta = Delta::from_json(
            r#"{"ops":[{"insert":"Title"},{"insert":"\n","attributes":{"header":"huge"}}]}"#,
        )
        .unwrap();
        let result = MarkdownRenderer::new().render(&delta);
        assert_eq!(result.output, "Title\n\n");
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_malformed_run_heading_falls_back() {
        let attrs = AttributeMap::new().with_bold().with_header(12);
        let delta = Delta::new(vec![styled("x", attrs)]);
        let result = HtmlRenderer::new().render(&delta);
        assert_eq!(result.output, "<strong>x</strong>");
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("op 0: "));
    }

    #[test]
    fn test_consecutive_bold_runs_each_wrapped() {
        let bold = AttributeMap::new().with_bold();
        let output = md(vec![styled("A", bold.clone()), styled("B", bold)]);
        assert_eq!(output, "**A****B**");
    }

    #[test]
    fn test_adjacency_reverses_nesting() {
        let both = AttributeMap::new().with_bold().with_italic();
        let bold = AttributeMap::new().with_bold();
        assert_eq!(
            md(vec![styled("A", both.clone()), styled("B", bold)]),
            "**_A_****B**"
        );
        assert_eq!(
            md(vec![styled("A", both), text("B")]),
            "_**A**_B"
        );
    }

    #[test]
    fn test_adjacency_only_looks_forward() {
        let both = AttributeMap::new().with_bold().with_italic();
        let bold = AttributeMap::new().with_bold();
        assert_eq!(
            md(vec![styled("A", bold), styled("B", both)]),
            "**A**_**B**_"
        );
    }

    #[test]
    fn test_space_only_run() {
        let ops = |attrs: AttributeMap| vec![text("a"), styled("  ", attrs), text("b")];
        let plain = html(ops(AttributeMap::new()));
        assert_eq!(plain, "a&nbsp;&nbsp;b");
        assert_eq!(html(ops(AttributeMap::new().with_bold())), plain);
        assert_eq!(md(ops(AttributeMap::new().with_strike())), "a  b");
    }

    #[test]
    fn test_leading_spaces_in_html() {
        assert_eq!(
            html(vec![text("  indented"), Op::line_break()]),
            "&nbsp;&nbsp;indented"
        );
    }

    #[test]
    fn test_embeds_skipped() {
        let mut image = serde_json::Map::new();
        image.insert("image".to_owned(), serde_json::Value::from("cat.png"));
        let ops = || {
            vec![
                text("a"),
                Op::new(Insert::Embed(image.clone())),
                text("b"),
                heading_break(1),
            ]
        };
        assert_eq!(html(ops()), "<h1>ab</h1>");
        assert_eq!(md(ops()), "# ab\n\n");
    }

    #[test]
    fn test_reserved_attributes_ignored() {
        let delta = Delta::from_json(
            r##"{"ops":[{"insert":"link","attributes":{"link":"https://example.com","color":"#f00"}},{"insert":"\n","attributes":{"align":"center"}}]}"##,
        )
        .unwrap();
        assert_eq!(render_html(Some(&delta)), "link");
        assert_eq!(render_markdown(Some(&delta)), "link\n\n");
    }

    #[test]
    fn test_escaping_disabled_by_default() {
        let delta = Delta::new(vec![text("a<b & c")]);
        assert_eq!(HtmlRenderer::new().render(&delta).output, "a<b & c");
        assert_eq!(
            HtmlRenderer::new().with_escaping(true).render(&delta).output,
            "a&lt;b &amp; c"
        );
        assert_eq!(
            MarkdownRenderer::new().with_escaping(true).render(&delta).output,
            "a<b & c"
        );
    }

    #[test]
    fn test_editor_document() {
        let delta = Delta::from_json(
            r#"{"ops":[
                {"insert":"Release notes"},
                {"insert":"\n","attributes":{"header":1}},
                {"insert":"Fixed "},
                {"insert":"crash","attributes":{"bold":true}},
                {"insert":" on "},
                {"insert":"startup","attributes":{"italic":true}},
                {"insert":".\nRemoved "},
                {"insert":"legacy","attributes":{"strike":true}},
                {"insert":" flag.\n"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            render_html(Some(&delta)),
            "<h1>Release notes</h1>Fixed <strong>crash</strong>&nbsp;on <em>startup</em>.Removed <s>legacy</s>&nbsp;flag."
        );
        assert_eq!(
            render_markdown(Some(&delta)),
            "# Release notes\n\nFixed **crash** on _startup_.\n\nRemoved ~~legacy~~ flag.\n\n"
        );
    }

    #[test]
    fn test_markdown_output_parses_as_intended() {
        let delta = Delta::new(vec![
            text("Title"),
            heading_break(1),
            text("plain "),
            styled("bold", AttributeMap::new().with_bold()),
            text(" and "),
            styled("it", AttributeMap::new().with_italic()),
            text(" and "),
            styled("gone", AttributeMap::new().with_strike()),
            Op::line_break(),
        ]);
        let markdown = render_markdown(Some(&delta));
        assert_eq!(
            markdown,
            "# Title\n\nplain **bold** and _it_ and ~~gone~~\n\n"
        );

        let events: Vec<Event<'_>> =
            Parser::new_ext(&markdown, Options::ENABLE_STRIKETHROUGH).collect();
        let starts = |pred: fn(&Tag<'_>) -> bool| {
            events
                .iter()
                .filter(|e| matches!(e, Event::Start(tag) if pred(tag)))
                .count()
        };
        assert_eq!(
            starts(|t| matches!(
                t,
                Tag::Heading {
                    level: pulldown_cmark::HeadingLevel::H1,
                    ..
                }
            )),
            1
        );
        assert_eq!(starts(|t| matches!(t, Tag::Strong)), 1);
        assert_eq!(starts(|t| matches!(t, Tag::Emphasis)), 1);
        assert_eq!(starts(|t| matches!(t, Tag::Strikethrough)), 1);
        assert_eq!(starts(|t| matches!(t, Tag::Paragraph)), 1);
    }

    #[test]
    fn test_renderers_share_delta_across_threads() {
        let delta = Delta::new(vec![
            styled("Title", AttributeMap::new().with_bold()),
            heading_break(2),
        ]);
        let (html_out, md_out) = std::thread::scope(|scope| {
            let html = scope.spawn(|| HtmlRenderer::new().render(&delta).output);
            let md = scope.spawn(|| MarkdownRenderer::new().render(&delta).output);
            (html.join().unwrap(), md.join().unwrap())
        });
        assert_eq!(html_out, "<h2><strong>Title</strong></h2>");
        assert_eq!(md_out, "## **Title**\n\n");
    }

    #[test]
    fn test_render_is_repeatable() {
        let renderer = HtmlRenderer::default();
        let delta = Delta::new(vec![text("T"), heading_break(1), text("x")]);
        let first = renderer.render(&delta);
        let second = renderer.render(&delta);
        assert_eq!(first.output, second.output);
        assert_eq!(first.output, "<h1>T</h1>x");
    }
}

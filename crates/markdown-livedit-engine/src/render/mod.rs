/*!
 * # Source-Preserving Markdown Rendering
 *
 * Renders markdown to HTML for a live-preview editor: the markdown source
 * stays fully visible and editable, and markdown structure is only expressed
 * as elements wrapped around it. `**bold**` becomes
 * `<strong>**bold**</strong>`, not `<strong>bold</strong>`.
 *
 * ## Invariant
 *
 * Every byte of the source is emitted exactly once, in order, as escaped
 * text. The visible text of the rendered HTML is therefore identical to the
 * source, which is what lets a caret offset taken in the old rendering be
 * restored in the new one.
 *
 * ## Pipeline
 *
 * 1. **`tree`**: pulldown-cmark offset events become a tree of source spans,
 *    each tagged with the element it renders as
 * 2. **emit**: a single cursor walks the tree, writing the source between
 *    spans as text and wrapping each span's output in its element
 */

pub mod span;
pub mod tree;

use pulldown_cmark::Options;
use serde::{Deserialize, Serialize};

use span::Span;
use tree::SpanNode;

/// Markdown dialect switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// GitHub flavoured extensions: tables, strikethrough, task lists and
    /// footnotes.
    pub gfm: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { gfm: true }
    }
}

impl RenderOptions {
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES
        } else {
            Options::empty()
        }
    }
}

/// Render `raw` markdown as source-preserving HTML.
pub fn render_markdown(raw: &str, options: &RenderOptions) -> String {
    let root = tree::build(raw, options.parser_options());
    let mut cursor = 0;
    let mut out = String::with_capacity(raw.len() * 2);
    emit(raw, &root, &mut cursor, &mut out);
    out
}

/// Write `node` to `out`. `cursor` is the first source byte not yet written
/// and only ever moves forward.
fn emit(raw: &str, node: &SpanNode, cursor: &mut usize, out: &mut String) {
    let mut inner = String::new();
    for child in &node.children {
        push_source(raw, cursor, child.span.start, &mut inner);
        emit(raw, child, cursor, &mut inner);
    }
    push_source(raw, cursor, node.span.end, &mut inner);

    let Some(wrap) = &node.wrap else {
        out.push_str(&inner);
        return;
    };
    out.push('<');
    out.push_str(wrap.tag);
    for (name, value) in &wrap.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');
    out.push_str(&inner);
    out.push_str("</");
    out.push_str(wrap.tag);
    out.push('>');
}

fn push_source(raw: &str, cursor: &mut usize, until: usize, out: &mut String) {
    let until = until.min(raw.len());
    let pending = Span::new(*cursor, until);
    if pending.is_empty() {
        return;
    }
    out.push_str(&html_escape::encode_text(&raw[pending.start..pending.end]));
    *cursor = until;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Dom;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn render(raw: &str) -> String {
        render_markdown(raw, &RenderOptions::default())
    }

    fn visible_text(html: &str) -> String {
        let mut dom = Dom::new();
        let root = dom.root();
        dom.set_inner_html(root, html);
        dom.text_content(root)
    }

    #[test]
    fn heading() {
        insta::assert_snapshot!(render("# Hi"), @"<h1># Hi</h1>");
    }

    #[test]
    fn emphasis_keeps_markers() {
        insta::assert_snapshot!(render("Hello *world*"), @"<p>Hello <em>*world*</em></p>");
    }

    #[test]
    fn strong_and_inline_code() {
        insta::assert_snapshot!(
            render("**b** and `c`"),
            @"<p><strong>**b**</strong> and <kbd>`c`</kbd></p>"
        );
    }

    #[test]
    fn link_href_and_text_are_escaped() {
        insta::assert_snapshot!(
            render("[a](http://x?y&z)"),
            @r#"<p><a href="http://x?y&amp;z">[a](http://x?y&amp;z)</a></p>"#
        );
    }

    #[test]
    fn strikethrough_follows_gfm_switch() {
        insta::assert_snapshot!(render("~~no~~"), @"<p><del>~~no~~</del></p>");
        insta::assert_snapshot!(
            render_markdown("~~no~~", &RenderOptions { gfm: false }),
            @"<p>~~no~~</p>"
        );
    }

    #[test]
    fn angle_brackets_are_text() {
        insta::assert_snapshot!(render("a < b"), @"<p>a &lt; b</p>");
    }

    #[test]
    fn empty_source_renders_nothing() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn lists_are_wrapped() {
        let html = render("- one\n- two\n\n1. first\n");
        assert!(html.contains("<ul>"), "{html}");
        assert!(html.contains("<ol>"), "{html}");
        assert_eq!(html.matches("<li>").count(), 3, "{html}");
    }

    #[rstest]
    #[case("")]
    #[case("plain")]
    #[case("# Title\n\nSome *emphasis* and **strong** text.\n")]
    #[case("- a\n  - nested `code`\n- b\n")]
    #[case("> quote\n> > deeper\n\n```rust\nfn main() {}\n```\n")]
    #[case("| a | b |\n|---|---|\n| 1 | 2 |\n")]
    #[case("Footnote[^1].\n\n[^1]: note\n")]
    #[case("- [ ] task\n- [x] done\n")]
    #[case("<div>inline html</div> & entities &amp; <b>tags</b>\n")]
    #[case("[ref][r]\n\n[r]: http://example.com\n")]
    #[case("line one  \nline two\\\nthree\n\n---\n")]
    #[case("héllo *wörld* ✓\n")]
    fn visible_text_equals_source(#[case] raw: &str) {
        assert_eq!(visible_text(&render(raw)), raw);
    }
}

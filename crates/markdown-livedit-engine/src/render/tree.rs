use pulldown_cmark::{Event, HeadingLevel, LinkType, Options, Parser, Tag};

use super::span::Span;

/// Tag (and attributes) a markdown construct is wrapped in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wrap {
    pub tag: &'static str,
    pub attrs: Vec<(&'static str, String)>,
}

impl Wrap {
    fn plain(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
        }
    }
}

/// A markdown construct: its source span, the element it renders as (if
/// any), and the constructs nested inside it.
#[derive(Debug, Clone)]
pub struct SpanNode {
    pub wrap: Option<Wrap>,
    pub span: Span,
    pub children: Vec<SpanNode>,
}

impl SpanNode {
    fn new(wrap: Option<Wrap>, span: Span) -> Self {
        Self {
            wrap,
            span,
            children: Vec::new(),
        }
    }
}

/// Parse `raw` into a tree of source spans rooted at the whole document.
///
/// Text events are not kept; the emitter recovers all text from the gaps
/// between spans.
pub fn build(raw: &str, options: Options) -> SpanNode {
    let mut stack = vec![SpanNode::new(None, Span::new(0, raw.len()))];

    for (event, range) in Parser::new_ext(raw, options).into_offset_iter() {
        let span = Span::from(range);
        match event {
            Event::Start(tag) => stack.push(SpanNode::new(wrap_for(&tag), span)),
            Event::End(_) => close(&mut stack),
            Event::Code(_) => {
                if let Some(parent) = stack.last_mut() {
                    parent
                        .children
                        .push(SpanNode::new(Some(Wrap::plain("kbd")), span));
                }
            }
            Event::Text(_) | Event::SoftBreak | Event::HardBreak => {}
            other => log::debug!("unhandled markdown event {other:?} at {span:?}"),
        }
    }

    while stack.len() > 1 {
        close(&mut stack);
    }
    stack.remove(0)
}

/// Pop the innermost open construct into its parent. The root is never
/// popped.
fn close(stack: &mut Vec<SpanNode>) {
    if stack.len() < 2 {
        return;
    }
    if let Some(node) = stack.pop()
        && let Some(parent) = stack.last_mut()
    {
        parent.children.push(node);
    }
}

fn heading_tag(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "h1",
        HeadingLevel::H2 => "h2",
        HeadingLevel::H3 => "h3",
        HeadingLevel::H4 => "h4",
        HeadingLevel::H5 => "h5",
        HeadingLevel::H6 => "h6",
    }
}

fn wrap_for(tag: &Tag) -> Option<Wrap> {
    let wrap = match tag {
        Tag::Paragraph => Wrap::plain("p"),
        Tag::Heading { level, .. } => Wrap::plain(heading_tag(*level)),
        Tag::BlockQuote(_) => Wrap::plain("blockquote"),
        Tag::CodeBlock(_) => Wrap::plain("code"),
        Tag::List(Some(_)) => Wrap::plain("ol"),
        Tag::List(None) => Wrap::plain("ul"),
        Tag::Item => Wrap::plain("li"),
        Tag::Emphasis => Wrap::plain("em"),
        Tag::Strong => Wrap::plain("strong"),
        Tag::Strikethrough => Wrap::plain("del"),
        // Reference-style links keep their source text unwrapped.
        Tag::Link {
            link_type: LinkType::Inline | LinkType::Autolink | LinkType::Email,
            dest_url,
            ..
        } => Wrap {
            tag: "a",
            attrs: vec![("href", dest_url.to_string())],
        },
        other => {
            log::debug!("unhandled markdown construct {other:?}, keeping source text");
            return None;
        }
    };
    Some(wrap)
}

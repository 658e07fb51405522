// Formatter strategies — one method per span type.
//
// A strategy is a complete set of span handlers. Each handler receives the
// span's metadata and its already-built children and returns the node for
// the span. The trait's default methods only preserve structure, so a
// partial strategy still renders every document.

use crate::drafty::{Data, SpanType};
use crate::node::FormatNode;

/// Metadata of the span being handled.
#[derive(Debug, Clone, Copy)]
pub struct SpanInfo<'a> {
    /// Type tag; `None` for untyped containers.
    pub tp: Option<&'a SpanType>,
    pub data: Option<&'a Data>,
    pub key: Option<usize>,
    /// Types of the enclosing spans, outermost first.
    pub stack: &'a [SpanType],
}

impl SpanInfo<'_> {
    /// Whether any enclosing span has type `tp`.
    pub fn inside(&self, tp: &SpanType) -> bool {
        self.stack.contains(tp)
    }
}

/// A rendering policy: span type → node.
pub trait Formatter {
    /// A text run of an untyped leaf span.
    fn text(&self, text: &str, _stack: &[SpanType]) -> FormatNode {
        FormatNode::text(text)
    }

    fn line_break(&self, _span: &SpanInfo<'_>) -> FormatNode {
        FormatNode::line_break()
    }

    /// `ST`, `EM`, `DL`, `HL` and `CO`.
    fn styled(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.unknown(span, children)
    }

    fn mention(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.unknown(span, children)
    }

    fn hashtag(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.unknown(span, children)
    }

    fn link(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.unknown(span, children)
    }

    fn image(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.unknown(span, children)
    }

    fn attachment(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.unknown(span, children)
    }

    fn button(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.unknown(span, children)
    }

    fn form(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.unknown(span, children)
    }

    fn row(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.unknown(span, children)
    }

    fn quote(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.unknown(span, children)
    }

    /// Untyped containers and unrecognized tags: children kept as they are.
    fn unknown(&self, _span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        FormatNode::container(children)
    }
}

/// Route a span to its handler based on type.
pub(crate) fn dispatch(
    formatter: &dyn Formatter,
    span: &SpanInfo<'_>,
    children: Vec<FormatNode>,
) -> FormatNode {
    let Some(tp) = span.tp else {
        return formatter.unknown(span, children);
    };
    match tp {
        SpanType::LineBreak => formatter.line_break(span),

        SpanType::Strong
        | SpanType::Emphasis
        | SpanType::Strikethrough
        | SpanType::Highlight
        | SpanType::Code => formatter.styled(span, children),

        SpanType::Mention => formatter.mention(span, children),
        SpanType::Hashtag => formatter.hashtag(span, children),
        SpanType::Link => formatter.link(span, children),
        SpanType::Image => formatter.image(span, children),
        SpanType::Attachment => formatter.attachment(span, children),
        SpanType::Button => formatter.button(span, children),
        SpanType::Form => formatter.form(span, children),
        SpanType::Row => formatter.row(span, children),
        SpanType::Quote => formatter.quote(span, children),

        SpanType::Unknown(_) => formatter.unknown(span, children),
    }
}

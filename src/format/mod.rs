// Drafty tree → FormatNode transform
//
// Walks a Drafty span tree depth-first. Children are built first, then the
// span's handler turns them into the span's node (bottom-up construction).
// The types of enclosing spans travel down the recursion in a stack, so a
// handler can tell where it is; once the stack holds a quote, a configured
// quote strategy takes over for the whole subtree.

pub(crate) mod full;
pub(crate) mod handlers;
pub(crate) mod quoted;

pub use full::DefaultFormatter;
pub use handlers::{Formatter, SpanInfo};
pub use quoted::{QuoteFormatter, QuotePolicy, Reduce};

use crate::drafty::{Span, SpanType};
use crate::node::FormatNode;

/// Nesting depth past which spans are flattened to plain text.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// The traversal driver: a default strategy, an optional strategy for quoted
/// content and a depth limit.
#[derive(Clone, Copy)]
pub struct Engine<'a> {
    formatter: &'a dyn Formatter,
    quote_formatter: Option<&'a dyn Formatter>,
    max_depth: usize,
}

impl<'a> Engine<'a> {
    pub fn new(formatter: &'a dyn Formatter) -> Self {
        Self {
            formatter,
            quote_formatter: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Use `formatter` for every span enclosed by a quote.
    pub fn with_quote_formatter(mut self, formatter: &'a dyn Formatter) -> Self {
        self.quote_formatter = Some(formatter);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Transform a whole document.
    pub fn transform(&self, root: &Span) -> FormatNode {
        self.transform_in(root, &[])
    }

    /// Transform a span as if it were enclosed by spans of types `stack`
    /// (outermost first).
    pub fn transform_in(&self, span: &Span, stack: &[SpanType]) -> FormatNode {
        let mut stack = stack.to_vec();
        self.one(span, &mut stack, 0)
    }

    /// Convert a single span and its subtree.
    fn one(&self, span: &Span, stack: &mut Vec<SpanType>, depth: usize) -> FormatNode {
        if depth >= self.max_depth {
            crate::debug!(depth, "nesting limit reached, flattening subtree");
            return FormatNode::text(flatten_text(span));
        }

        let formatter = self.formatter_for(stack);

        if span.is_text() {
            return formatter.text(span.text.as_deref().unwrap_or_default(), stack);
        }

        let children = self.all(span, stack, depth);
        let info = SpanInfo {
            tp: span.tp.as_ref(),
            data: span.data.as_ref(),
            key: span.key,
            stack: stack.as_slice(),
        };
        handlers::dispatch(formatter, &info, children)
    }

    /// Convert the children of a span, with the span's type on the stack.
    fn all(&self, span: &Span, stack: &mut Vec<SpanType>, depth: usize) -> Vec<FormatNode> {
        if let Some(tp) = &span.tp {
            stack.push(tp.clone());
        }

        let children = if span.children.is_empty() {
            // A typed span may carry its text directly instead of as a child leaf.
            match &span.text {
                Some(text) => vec![self.formatter_for(stack).text(text, stack)],
                None => Vec::new(),
            }
        } else {
            span.children
                .iter()
                .map(|child| self.one(child, stack, depth + 1))
                .collect()
        };

        if span.tp.is_some() {
            stack.pop();
        }
        children
    }

    fn formatter_for(&self, stack: &[SpanType]) -> &'a dyn Formatter {
        match self.quote_formatter {
            Some(quoted) if stack.contains(&SpanType::Quote) => quoted,
            _ => self.formatter,
        }
    }
}

/// All text beneath `span`, with line breaks kept. Iterative, so it is safe
/// on trees of any depth.
fn flatten_text(span: &Span) -> String {
    let mut out = String::new();
    let mut pending = vec![span];
    while let Some(span) = pending.pop() {
        if span.tp == Some(SpanType::LineBreak) {
            out.push('\n');
            continue;
        }
        if span.children.is_empty() {
            if let Some(text) = &span.text {
                out.push_str(text);
            }
        }
        pending.extend(span.children.iter().rev());
    }
    out
}

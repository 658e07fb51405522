// Quoted-context strategy.
//
// Content nested inside a quoted block is a reply preview, not the message
// itself: it renders in a muted style and interactive or heavy content is
// reduced according to a policy table. Anything the policy does not cover
// is delegated to the default strategy.

use super::full::DefaultFormatter;
use super::handlers::{Formatter, SpanInfo};
use crate::attachment::AttachmentKind;
use crate::drafty::{data_string, SpanType};
use crate::node::{FormatNode, StyleProperty, StyleSet};
use crate::palette;

/// How a kind of content is rendered inside a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduce {
    /// Same as outside a quote.
    Keep,
    /// Replaced by a short italic text label.
    Placeholder,
    /// Omitted entirely.
    Drop,
}

/// Rules for quoted content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePolicy {
    /// Images (`IM`). Placeholder: `[image]` or `[image: <name>]`.
    pub images: Reduce,
    /// File attachments (`EX`). Placeholder: `[file]` or `[file: <name>]`.
    pub attachments: Reduce,
    /// Buttons (`BN`). Placeholder: the button's text, without an action.
    pub buttons: Reduce,
    /// Quotes inside quotes (`QQ`). Placeholder: content without a quote bar.
    pub nested_quotes: Reduce,
    /// Whether links keep their link style.
    pub links: bool,
    /// Whether mentions are colored by user; otherwise they render bold.
    pub mention_color: bool,
    /// Style given to every text run in quoted context.
    pub text_style: StyleSet,
}

impl Default for QuotePolicy {
    fn default() -> Self {
        Self {
            images: Reduce::Placeholder,
            attachments: Reduce::Placeholder,
            buttons: Reduce::Placeholder,
            nested_quotes: Reduce::Drop,
            links: false,
            mention_color: false,
            text_style: StyleSet::from(StyleProperty::Foreground(palette::QUOTE_TEXT)),
        }
    }
}

impl QuotePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// A policy that renders quoted content exactly like other content.
    pub fn keep_all() -> Self {
        Self {
            images: Reduce::Keep,
            attachments: Reduce::Keep,
            buttons: Reduce::Keep,
            nested_quotes: Reduce::Keep,
            links: true,
            mention_color: true,
            text_style: StyleSet::new(),
        }
    }

    pub fn with_images(mut self, rule: Reduce) -> Self {
        self.images = rule;
        self
    }

    pub fn with_attachments(mut self, rule: Reduce) -> Self {
        self.attachments = rule;
        self
    }

    pub fn with_buttons(mut self, rule: Reduce) -> Self {
        self.buttons = rule;
        self
    }

    pub fn with_nested_quotes(mut self, rule: Reduce) -> Self {
        self.nested_quotes = rule;
        self
    }

    pub fn with_links(mut self, links: bool) -> Self {
        self.links = links;
        self
    }

    pub fn with_mention_color(mut self, color: bool) -> Self {
        self.mention_color = color;
        self
    }

    pub fn with_text_style(mut self, style: StyleSet) -> Self {
        self.text_style = style;
        self
    }
}

/// Strategy used for spans nested inside a quoted block.
#[derive(Debug, Clone, Default)]
pub struct QuoteFormatter {
    policy: QuotePolicy,
    base: DefaultFormatter,
}

impl QuoteFormatter {
    pub fn new(policy: QuotePolicy) -> Self {
        Self {
            policy,
            base: DefaultFormatter,
        }
    }

    pub fn policy(&self) -> &QuotePolicy {
        &self.policy
    }

    fn placeholder(&self, label: &str, name: Option<String>) -> FormatNode {
        let text = match name {
            Some(name) if !name.is_empty() => format!("[{label}: {name}]"),
            _ => format!("[{label}]"),
        };
        FormatNode::text(text)
            .with_style(self.policy.text_style.clone())
            .with_property(StyleProperty::Italic)
    }
}

impl Formatter for QuoteFormatter {
    fn text(&self, text: &str, _stack: &[SpanType]) -> FormatNode {
        FormatNode::text(text).with_style(self.policy.text_style.clone())
    }

    fn line_break(&self, span: &SpanInfo<'_>) -> FormatNode {
        self.base.line_break(span)
    }

    fn styled(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.base.styled(span, children)
    }

    fn mention(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        if self.policy.mention_color {
            self.base.mention(span, children)
        } else {
            FormatNode::container(children).with_property(StyleProperty::Bold)
        }
    }

    fn hashtag(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.base.hashtag(span, children)
    }

    fn link(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        if self.policy.links {
            self.base.link(span, children)
        } else {
            FormatNode::container(children)
        }
    }

    fn image(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        match self.policy.images {
            Reduce::Keep => self.base.image(span, children),
            Reduce::Placeholder => {
                self.placeholder("image", span.data.and_then(|data| data_string(data, "name")))
            }
            Reduce::Drop => FormatNode::empty(),
        }
    }

    fn attachment(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        // Sidecars stay hidden whatever the policy says.
        let node = self.base.attachment(span, children);
        if node.attachment.is_none() {
            return node;
        }
        match self.policy.attachments {
            Reduce::Keep => node,
            Reduce::Placeholder => {
                let name = node.attachment.and_then(|att| match att.kind {
                    AttachmentKind::Empty => None,
                    _ => att.name,
                });
                self.placeholder("file", name)
            }
            Reduce::Drop => FormatNode::empty(),
        }
    }

    fn button(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        match self.policy.buttons {
            Reduce::Keep => self.base.button(span, children),
            Reduce::Placeholder => FormatNode::container(children),
            Reduce::Drop => FormatNode::empty(),
        }
    }

    fn form(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.base.form(span, children)
    }

    fn row(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.base.row(span, children)
    }

    fn quote(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        match self.policy.nested_quotes {
            Reduce::Keep => self.base.quote(span, children),
            Reduce::Placeholder => {
                FormatNode::container(vec![FormatNode::container(children), FormatNode::line_break()])
            }
            Reduce::Drop => FormatNode::empty(),
        }
    }

    fn unknown(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        self.base.unknown(span, children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drafty::Data;
    use crate::node::StyleKey;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    static STACK: [SpanType; 1] = [SpanType::Quote];

    fn data(value: serde_json::Value) -> Data {
        value.as_object().cloned().unwrap()
    }

    fn info<'a>(tp: &'a SpanType, data: Option<&'a Data>) -> SpanInfo<'a> {
        SpanInfo {
            tp: Some(tp),
            data,
            key: None,
            stack: &STACK,
        }
    }

    #[test]
    fn test_text_gets_quote_style() {
        let f = QuoteFormatter::default();
        let node = f.text("hi", &STACK);
        assert_eq!(
            node.style.get(StyleKey::Foreground),
            Some(&StyleProperty::Foreground(palette::QUOTE_TEXT))
        );
    }

    #[test]
    fn test_image_placeholder() {
        let f = QuoteFormatter::default();
        let tp = SpanType::Image;
        let d = data(json!({"name": "cat.jpg", "mime": "image/jpeg"}));
        let node = f.image(&info(&tp, Some(&d)), vec![]);
        assert!(node.attachment.is_none());
        assert_eq!(node.as_text(), Some("[image: cat.jpg]"));
        assert!(node.style.contains(StyleKey::Italic));

        let node = f.image(&info(&tp, None), vec![]);
        assert_eq!(node.as_text(), Some("[image]"));
    }

    #[test]
    fn test_image_keep_and_drop() {
        let tp = SpanType::Image;
        let keep = QuoteFormatter::new(QuotePolicy::new().with_images(Reduce::Keep));
        let node = keep.image(&info(&tp, None), vec![]);
        assert_eq!(node.attachment.map(|a| a.kind), Some(AttachmentKind::Image));

        let drop = QuoteFormatter::new(QuotePolicy::new().with_images(Reduce::Drop));
        assert!(drop.image(&info(&tp, None), vec![]).is_empty());
    }

    #[test]
    fn test_attachment_placeholder_and_sidecar() {
        let f = QuoteFormatter::default();
        let tp = SpanType::Attachment;

        let file = data(json!({"name": "report.pdf", "ref": "/v0/file/s/r.pdf"}));
        assert_eq!(f.attachment(&info(&tp, Some(&file)), vec![]).as_text(), Some("[file: report.pdf]"));

        let empty = data(json!({"name": "lost.bin"}));
        assert_eq!(f.attachment(&info(&tp, Some(&empty)), vec![]).as_text(), Some("[file]"));

        let sidecar = data(json!({"mime": "application/json", "val": "e30="}));
        assert_eq!(f.attachment(&info(&tp, Some(&sidecar)), vec![]), FormatNode::empty());
    }

    #[test]
    fn test_button_loses_action() {
        let f = QuoteFormatter::default();
        let tp = SpanType::Button;
        let d = data(json!({"act": "pub", "name": "ok"}));
        let node = f.button(&info(&tp, Some(&d)), vec![FormatNode::text("OK")]);
        assert!(node.attachment.is_none());
        assert_eq!(node.plain_text(), "OK");

        let keep = QuoteFormatter::new(QuotePolicy::new().with_buttons(Reduce::Keep));
        let node = keep.button(&info(&tp, Some(&d)), vec![FormatNode::text("OK")]);
        assert_eq!(node.attachment.map(|a| a.kind), Some(AttachmentKind::Button));
    }

    #[test]
    fn test_links_and_mentions() {
        let f = QuoteFormatter::default();
        let link = SpanType::Link;
        let d = data(json!({"url": "https://example.com", "val": "usrBob"}));
        let node = f.link(&info(&link, Some(&d)), vec![FormatNode::text("x")]);
        assert!(!node.style.contains(StyleKey::Link));

        let mention = SpanType::Mention;
        let node = f.mention(&info(&mention, Some(&d)), vec![FormatNode::text("@bob")]);
        assert!(node.style.contains(StyleKey::Bold));
        assert!(!node.style.contains(StyleKey::Foreground));

        let full = QuoteFormatter::new(QuotePolicy::keep_all());
        let node = full.link(&info(&link, Some(&d)), vec![FormatNode::text("x")]);
        assert!(node.style.contains(StyleKey::Link));
    }

    #[test]
    fn test_nested_quote_rules() {
        let tp = SpanType::Quote;
        let drop = QuoteFormatter::default();
        assert!(drop.quote(&info(&tp, None), vec![FormatNode::text("old")]).is_empty());

        let flat = QuoteFormatter::new(QuotePolicy::new().with_nested_quotes(Reduce::Placeholder));
        let node = flat.quote(&info(&tp, None), vec![FormatNode::text("old")]);
        assert_eq!(node.plain_text(), "old\n");
        assert!(node.leaves().iter().all(|leaf| leaf.attachment().is_none()));
    }
}

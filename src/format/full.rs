// Default strategy — full rendering of every span type.

use url::Url;

use super::handlers::{Formatter, SpanInfo};
use crate::attachment::{Attachment, AttachmentKind};
use crate::button;
use crate::drafty::{data_str, data_string, SpanType};
use crate::node::{FormatNode, StyleProperty};
use crate::palette;

/// MIME type of machine-readable sidecars that are never shown.
const JSON_MIME: &str = "application/json";

/// Renders links, mentions, images, attachments, buttons, forms and quotes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {
    fn styled(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        let node = FormatNode::container(children);
        match span.tp.and_then(inline_style) {
            Some(property) => node.with_property(property),
            None => node,
        }
    }

    fn mention(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        let node = FormatNode::container(children);
        match span.data.and_then(|data| data_string(data, "val")) {
            Some(id) => node.with_property(StyleProperty::Foreground(palette::mention_color(&id))),
            None => node,
        }
    }

    fn hashtag(&self, _span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        FormatNode::container(children)
    }

    fn link(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        let node = FormatNode::container(children);
        let Some(raw) = span.data.and_then(|data| data_str(data, "url")) else {
            return node;
        };
        match link_target(raw) {
            Some(url) => node.with_property(StyleProperty::Link(url)),
            None => {
                crate::debug!(url = raw, "link target rejected");
                node
            }
        }
    }

    fn image(&self, span: &SpanInfo<'_>, _children: Vec<FormatNode>) -> FormatNode {
        let attachment = span
            .data
            .map(Attachment::image)
            .unwrap_or_else(|| Attachment::new(AttachmentKind::Image));
        FormatNode::attachment_leaf(attachment.with_entity_key(span.key))
    }

    fn attachment(&self, span: &SpanInfo<'_>, _children: Vec<FormatNode>) -> FormatNode {
        let Some(data) = span.data else {
            return FormatNode::attachment_leaf(Attachment::empty().with_entity_key(span.key));
        };
        if data_str(data, "mime") == Some(JSON_MIME) {
            crate::debug!("json sidecar suppressed");
            return FormatNode::empty();
        }
        FormatNode::attachment_leaf(Attachment::file(data).with_entity_key(span.key))
    }

    fn button(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        let face = FormatNode::container(children);
        let label = face.plain_text();
        match span.data.and_then(|data| button::build_uri(&label, data)) {
            Some(uri) => {
                let attachment = Attachment::button(uri, label).with_entity_key(span.key);
                face.with_attachment(attachment)
            }
            None => {
                crate::debug!(label = label.as_str(), "button has no usable action");
                face
            }
        }
    }

    fn form(&self, _span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        FormatNode::container(separate_lines(children))
    }

    fn row(&self, _span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        FormatNode::container(children)
    }

    fn quote(&self, span: &SpanInfo<'_>, children: Vec<FormatNode>) -> FormatNode {
        let inner = FormatNode::container(children)
            .with_attachment(Attachment::quote().with_entity_key(span.key));
        FormatNode::container(vec![inner, FormatNode::line_break()])
    }
}

/// Style applied by the simple inline styles.
pub(crate) fn inline_style(tp: &SpanType) -> Option<StyleProperty> {
    match tp {
        SpanType::Strong => Some(StyleProperty::Bold),
        SpanType::Emphasis => Some(StyleProperty::Italic),
        SpanType::Strikethrough => Some(StyleProperty::Strikethrough),
        SpanType::Highlight => Some(StyleProperty::Background(palette::HIGHLIGHT)),
        SpanType::Code => Some(StyleProperty::Monospace),
        _ => None,
    }
}

/// Parse a link target; only absolute `http` and `https` URLs are accepted.
pub(crate) fn link_target(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    // `Url` lowercases the scheme, so `HTTP://` is accepted here.
    matches!(url.scheme(), "http" | "https").then_some(url)
}

/// Put a line break between every pair of adjacent nodes.
pub(crate) fn separate_lines(children: Vec<FormatNode>) -> Vec<FormatNode> {
    let mut result = Vec::with_capacity(children.len() * 2);
    for (i, child) in children.into_iter().enumerate() {
        if i > 0 {
            result.push(FormatNode::line_break());
        }
        result.push(child);
    }
    result
}

// Render tree — FormatNode, styles and leaf flattening.
//
// The transform builds FormatNodes bottom-up. Each node holds text or
// children (never both), its own style set and an optional attachment.
// Target surfaces cannot nest style regions, so styles are resolved at the
// leaves: `leaves()` walks the tree and gives each text run or attachment
// the union of every style on its path, nearest node winning.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

use crate::attachment::{Attachment, AttachmentKind};

// ---------------------------------------------------------------------------
// Styles
// ---------------------------------------------------------------------------

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xFF {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

/// Identifies which property a [`StyleProperty`] sets. A [`StyleSet`] holds
/// at most one property per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleKey {
    Bold,
    Italic,
    Strikethrough,
    Monospace,
    Foreground,
    Background,
    Link,
}

/// A single style attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Bold,
    Italic,
    Strikethrough,
    Monospace,
    Foreground(Color),
    Background(Color),
    /// Link target; always an `http` or `https` URL.
    Link(Url),
}

impl StyleProperty {
    pub fn key(&self) -> StyleKey {
        match self {
            StyleProperty::Bold => StyleKey::Bold,
            StyleProperty::Italic => StyleKey::Italic,
            StyleProperty::Strikethrough => StyleKey::Strikethrough,
            StyleProperty::Monospace => StyleKey::Monospace,
            StyleProperty::Foreground(_) => StyleKey::Foreground,
            StyleProperty::Background(_) => StyleKey::Background,
            StyleProperty::Link(_) => StyleKey::Link,
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleProperty::Bold => f.write_str("bold"),
            StyleProperty::Italic => f.write_str("italic"),
            StyleProperty::Strikethrough => f.write_str("strikethrough"),
            StyleProperty::Monospace => f.write_str("monospace"),
            StyleProperty::Foreground(c) => write!(f, "fg={c}"),
            StyleProperty::Background(c) => write!(f, "bg={c}"),
            StyleProperty::Link(url) => write!(f, "link={url}"),
        }
    }
}

/// A set of style attributes with at most one value per [`StyleKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSet(BTreeMap<StyleKey, StyleProperty>);

impl StyleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `property`, returning the value it replaced.
    pub fn insert(&mut self, property: StyleProperty) -> Option<StyleProperty> {
        self.0.insert(property.key(), property)
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, property: StyleProperty) -> Self {
        self.insert(property);
        self
    }

    pub fn get(&self, key: StyleKey) -> Option<&StyleProperty> {
        self.0.get(&key)
    }

    pub fn contains(&self, key: StyleKey) -> bool {
        self.0.contains_key(&key)
    }

    /// Union with `other`; for a key present in both, `other` wins.
    pub fn merge(&mut self, other: &StyleSet) {
        for (key, property) in &other.0 {
            self.0.insert(*key, property.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleProperty> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<StyleProperty> for StyleSet {
    fn from(property: StyleProperty) -> Self {
        StyleSet::new().with(property)
    }
}

impl FromIterator<StyleProperty> for StyleSet {
    fn from_iter<I: IntoIterator<Item = StyleProperty>>(iter: I) -> Self {
        let mut set = StyleSet::new();
        for property in iter {
            set.insert(property);
        }
        set
    }
}

impl fmt::Display for StyleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, property) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{property}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FormatNode
// ---------------------------------------------------------------------------

/// What a node contains: a text run or child nodes, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Children(Vec<FormatNode>),
}

/// A node of the render tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatNode {
    pub content: Content,
    /// Styles set on this node; descendants inherit them unless they set the
    /// same key themselves.
    pub style: StyleSet,
    /// Non-text content. When present the node renders as a single inline
    /// object instead of its content (quotes draw their content inside).
    pub attachment: Option<Attachment>,
}

impl FormatNode {
    /// A text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Content::Text(text.into()),
            style: StyleSet::new(),
            attachment: None,
        }
    }

    /// An internal node wrapping `children`.
    pub fn container(children: Vec<FormatNode>) -> Self {
        Self {
            content: Content::Children(children),
            style: StyleSet::new(),
            attachment: None,
        }
    }

    /// A node that renders as nothing.
    pub fn empty() -> Self {
        Self::container(Vec::new())
    }

    /// A text leaf holding a single newline.
    pub fn line_break() -> Self {
        Self::text("\n")
    }

    /// An attachment leaf.
    pub fn attachment_leaf(attachment: Attachment) -> Self {
        Self::empty().with_attachment(attachment)
    }

    /// Merge `style` into this node's own styles; `style` wins on shared keys.
    pub fn with_style(mut self, style: StyleSet) -> Self {
        self.style.merge(&style);
        self
    }

    pub fn with_property(mut self, property: StyleProperty) -> Self {
        self.style.insert(property);
        self
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Children(_) => None,
        }
    }

    /// Child nodes; empty for text leaves.
    pub fn child_nodes(&self) -> &[FormatNode] {
        match &self.content {
            Content::Text(_) => &[],
            Content::Children(children) => children,
        }
    }

    /// Whether this node renders nothing at all.
    pub fn is_empty(&self) -> bool {
        self.attachment.is_none()
            && match &self.content {
                Content::Text(text) => text.is_empty(),
                Content::Children(children) => children.iter().all(FormatNode::is_empty),
            }
    }

    /// Concatenated text of all text leaves, ignoring styles. The node's own
    /// attachment is ignored; below it, content superseded by an attachment
    /// contributes nothing, as in [`leaves`](Self::leaves).
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        match &self.content {
            Content::Text(text) => out.push_str(text),
            Content::Children(children) => {
                for child in children {
                    child.collect_text(&mut out);
                }
            }
        }
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(attachment) = &self.attachment {
            if attachment.kind != AttachmentKind::Quote {
                return;
            }
        }
        match &self.content {
            Content::Text(text) => out.push_str(text),
            Content::Children(children) => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Flatten the tree into leaves with fully resolved styles.
    pub fn leaves(&self) -> Vec<Leaf<'_>> {
        let mut out = Vec::new();
        self.collect_leaves(&StyleSet::new(), 0, &mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, inherited: &StyleSet, quote_depth: usize, out: &mut Vec<Leaf<'a>>) {
        let mut style = inherited.clone();
        style.merge(&self.style);

        if let Some(attachment) = &self.attachment {
            out.push(Leaf {
                content: LeafContent::Attachment(attachment),
                style: style.clone(),
                quote_depth,
            });
            if attachment.kind != AttachmentKind::Quote {
                return;
            }
            for child in self.child_nodes() {
                child.collect_leaves(&style, quote_depth + 1, out);
            }
            return;
        }

        match &self.content {
            Content::Text(text) => {
                if !text.is_empty() {
                    out.push(Leaf {
                        content: LeafContent::Text(text),
                        style,
                        quote_depth,
                    });
                }
            }
            Content::Children(children) => {
                for child in children {
                    child.collect_leaves(&style, quote_depth, out);
                }
            }
        }
    }
}

/// What a flattened leaf renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafContent<'a> {
    Text(&'a str),
    Attachment(&'a Attachment),
}

/// A text run or attachment with its resolved style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf<'a> {
    pub content: LeafContent<'a>,
    pub style: StyleSet,
    /// Number of quoted blocks enclosing this leaf.
    pub quote_depth: usize,
}

impl Leaf<'_> {
    pub fn text(&self) -> Option<&str> {
        match self.content {
            LeafContent::Text(text) => Some(text),
            LeafContent::Attachment(_) => None,
        }
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        match self.content {
            LeafContent::Text(_) => None,
            LeafContent::Attachment(att) => Some(att),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RED: Color = Color::rgb(0xFF, 0, 0);
    const BLUE: Color = Color::rgb(0, 0, 0xFF);

    #[test]
    fn test_style_set_last_write_wins() {
        let mut set = StyleSet::from(StyleProperty::Foreground(RED));
        let old = set.insert(StyleProperty::Foreground(BLUE));
        assert_eq!(old, Some(StyleProperty::Foreground(RED)));
        assert_eq!(set.get(StyleKey::Foreground), Some(&StyleProperty::Foreground(BLUE)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_merge_is_idempotent() {
        let style: StyleSet = [StyleProperty::Bold, StyleProperty::Italic].into_iter().collect();
        let once = FormatNode::text("a").with_style(style.clone());
        let twice = once.clone().with_style(style);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_nearest_style_wins_at_leaves() {
        // outer: fg=red + bold; inner: fg=blue
        let inner = FormatNode::container(vec![FormatNode::text("in")])
            .with_property(StyleProperty::Foreground(BLUE));
        let outer = FormatNode::container(vec![inner, FormatNode::text("out")])
            .with_style([StyleProperty::Foreground(RED), StyleProperty::Bold].into_iter().collect());

        let leaves = outer.leaves();
        assert_eq!(leaves.len(), 2);

        assert_eq!(leaves[0].text(), Some("in"));
        assert_eq!(leaves[0].style.get(StyleKey::Foreground), Some(&StyleProperty::Foreground(BLUE)));
        assert!(leaves[0].style.contains(StyleKey::Bold));

        assert_eq!(leaves[1].text(), Some("out"));
        assert_eq!(leaves[1].style.get(StyleKey::Foreground), Some(&StyleProperty::Foreground(RED)));
        assert!(leaves[1].style.contains(StyleKey::Bold));
    }

    #[test]
    fn test_attachment_supersedes_content() {
        let node = FormatNode::container(vec![FormatNode::text("hidden")])
            .with_attachment(Attachment::empty());
        let leaves = node.leaves();
        assert_eq!(leaves.len(), 1);
        assert_eq!(leaves[0].attachment().map(|a| a.kind), Some(AttachmentKind::Empty));
    }

    #[test]
    fn test_quote_leaves_are_nested() {
        let quote = FormatNode::container(vec![FormatNode::text("quoted")])
            .with_attachment(Attachment::quote());
        let root = FormatNode::container(vec![quote, FormatNode::text("after")]);

        let leaves = root.leaves();
        assert_eq!(leaves.len(), 3);
        assert_eq!(leaves[0].attachment().map(|a| a.kind), Some(AttachmentKind::Quote));
        assert_eq!(leaves[0].quote_depth, 0);
        assert_eq!(leaves[1].text(), Some("quoted"));
        assert_eq!(leaves[1].quote_depth, 1);
        assert_eq!(leaves[2].text(), Some("after"));
        assert_eq!(leaves[2].quote_depth, 0);
    }

    #[test]
    fn test_plain_text_and_empty() {
        let node = FormatNode::container(vec![
            FormatNode::text("a"),
            FormatNode::container(vec![FormatNode::text("b"), FormatNode::line_break()]),
        ]);
        assert_eq!(node.plain_text(), "ab\n");
        assert!(!node.is_empty());
        assert!(FormatNode::container(vec![FormatNode::empty(), FormatNode::text("")]).is_empty());
        assert!(node.child_nodes()[0].child_nodes().is_empty());
    }

    #[test]
    fn test_plain_text_skips_superseded_content() {
        let inner = FormatNode::container(vec![FormatNode::text("inner")])
            .with_attachment(Attachment::button("https://x/".into(), "inner".into()));
        let face = FormatNode::container(vec![FormatNode::text("outer "), inner]);
        assert_eq!(face.plain_text(), "outer ");

        let quote = FormatNode::container(vec![FormatNode::text("said")]).with_attachment(Attachment::quote());
        assert_eq!(FormatNode::container(vec![quote]).plain_text(), "said");
    }

    #[test]
    fn test_style_display() {
        let set: StyleSet = [StyleProperty::Italic, StyleProperty::Bold, StyleProperty::Foreground(RED)]
            .into_iter()
            .collect();
        assert_eq!(set.to_string(), "bold,italic,fg=#ff0000");
    }
}

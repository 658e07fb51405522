// Shared test helpers for drafty-format.

#![allow(dead_code)]

use drafty_format::{AttachmentKind, FormatNode, Span};

/// Build a span tree from a `json!` literal.
pub fn doc(value: serde_json::Value) -> Span {
    drafty_format::document_from_value(value).expect("valid Drafty tree")
}

/// Texts of the text leaves, in order.
pub fn texts(node: &FormatNode) -> Vec<String> {
    node.leaves()
        .iter()
        .filter_map(|leaf| leaf.text().map(str::to_string))
        .collect()
}

/// Kinds of the attachment leaves, in order.
pub fn attachment_kinds(node: &FormatNode) -> Vec<AttachmentKind> {
    node.leaves()
        .iter()
        .filter_map(|leaf| leaf.attachment().map(|att| att.kind))
        .collect()
}

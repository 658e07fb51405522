// Inline attachments — non-text content carried by a FormatNode.

use base64::Engine as _;

use crate::drafty::{data_str, data_string, data_u64, Data};

/// What an attachment renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// Inline image.
    Image,
    /// Generic file, inband or by reference.
    Data,
    /// Missing or invalid payload; rendered as a placeholder.
    Empty,
    /// Quote bar drawn around the node's content.
    Quote,
    /// Interactive button; `reference` is the action URI.
    Button,
}

/// Payload describing a piece of non-text inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub kind: AttachmentKind,
    /// Inband payload.
    pub bits: Option<Vec<u8>>,
    /// Out-of-band URI. For buttons, the callback or deep-link URI.
    pub reference: Option<String>,
    pub mime: Option<String>,
    /// File name, or the visible label of a button.
    pub name: Option<String>,
    pub size: Option<u64>,
    pub width: Option<u64>,
    pub height: Option<u64>,
    /// Entity key of the span this attachment came from.
    pub entity_key: Option<usize>,
}

impl Attachment {
    /// An attachment of `kind` with no payload fields set.
    pub fn new(kind: AttachmentKind) -> Self {
        Self {
            kind,
            bits: None,
            reference: None,
            mime: None,
            name: None,
            size: None,
            width: None,
            height: None,
            entity_key: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(AttachmentKind::Empty)
    }

    pub fn quote() -> Self {
        Self::new(AttachmentKind::Quote)
    }

    /// A button whose action resolves to `uri`, labelled `label`.
    pub fn button(uri: String, label: String) -> Self {
        Self {
            reference: Some(uri),
            name: Some(label),
            ..Self::new(AttachmentKind::Button)
        }
    }

    /// An image described by a span's data (`val`, `ref`, `mime`, `name`,
    /// `size`, `width`, `height`). The payload is not validated.
    pub fn image(data: &Data) -> Self {
        let mut att = Self::from_data(AttachmentKind::Image, data);
        att.width = data_u64(data, "width");
        att.height = data_u64(data, "height");
        att
    }

    /// A generic file described by a span's data. Becomes [`AttachmentKind::Empty`]
    /// when there is neither an inband payload nor a reference.
    pub fn file(data: &Data) -> Self {
        Self::from_data(AttachmentKind::Data, data).normalized()
    }

    pub fn with_entity_key(mut self, key: Option<usize>) -> Self {
        self.entity_key = key;
        self
    }

    /// Whether there is anything to render or fetch.
    pub fn has_payload(&self) -> bool {
        self.bits.is_some() || self.reference.is_some()
    }

    fn from_data(kind: AttachmentKind, data: &Data) -> Self {
        Self {
            bits: data_str(data, "val").and_then(decode_bits),
            reference: data_str(data, "ref").map(str::to_string),
            mime: data_str(data, "mime").map(str::to_string),
            name: data_string(data, "name"),
            size: data_u64(data, "size"),
            ..Self::new(kind)
        }
    }

    fn normalized(mut self) -> Self {
        if self.kind == AttachmentKind::Data && !self.has_payload() {
            self.kind = AttachmentKind::Empty;
        }
        self
    }
}

/// Decode an inband `val` payload. Undecodable payloads count as absent.
fn decode_bits(val: &str) -> Option<Vec<u8>> {
    base64::engine::general_purpose::STANDARD.decode(val).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: serde_json::Value) -> Data {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_image_reads_all_fields() {
        let att = Attachment::image(&data(json!({
            "val": "aGVsbG8=",
            "mime": "image/png",
            "name": "cat.png",
            "ref": "https://example.com/cat.png",
            "size": 5,
            "width": 640,
            "height": "480"
        })));
        assert_eq!(att.kind, AttachmentKind::Image);
        assert_eq!(att.bits.as_deref(), Some(&b"hello"[..]));
        assert_eq!(att.mime.as_deref(), Some("image/png"));
        assert_eq!(att.name.as_deref(), Some("cat.png"));
        assert_eq!(att.reference.as_deref(), Some("https://example.com/cat.png"));
        assert_eq!(att.size, Some(5));
        assert_eq!(att.width, Some(640));
        assert_eq!(att.height, Some(480));
    }

    #[test]
    fn test_image_without_payload_stays_image() {
        let att = Attachment::image(&Data::new());
        assert_eq!(att.kind, AttachmentKind::Image);
        assert!(!att.has_payload());
    }

    #[test]
    fn test_file_without_payload_is_empty() {
        let att = Attachment::file(&data(json!({"mime": "text/plain", "name": "a.txt"})));
        assert_eq!(att.kind, AttachmentKind::Empty);
        assert_eq!(att.name.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_file_with_reference_is_data() {
        let att = Attachment::file(&data(json!({"ref": "/v0/file/s/abc.pdf"})));
        assert_eq!(att.kind, AttachmentKind::Data);
        assert!(att.bits.is_none());
    }

    #[test]
    fn test_invalid_base64_counts_as_absent() {
        let att = Attachment::file(&data(json!({"val": "not base64!"})));
        assert!(att.bits.is_none());
        assert_eq!(att.kind, AttachmentKind::Empty);
    }

    #[test]
    fn test_entity_key_is_copied() {
        let att = Attachment::quote().with_entity_key(Some(4));
        assert_eq!(att.entity_key, Some(4));
        assert_eq!(att.kind, AttachmentKind::Quote);
    }
}

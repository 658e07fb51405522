// Drafty document tree — the span-annotated input model.
//
// A document arrives as a tree of spans. Each span carries an optional type
// tag, an optional data payload, an optional entity key and either a run of
// text (leaf) or an ordered list of child spans. The tree is produced by an
// external parser and is never modified here.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Type-specific span payload: a JSON object (`url`, `val`, `mime`, `ref`, ...).
pub type Data = serde_json::Map<String, Value>;

/// Span type tag, using the Drafty wire names.
///
/// Tags this crate does not know are kept verbatim in [`SpanType::Unknown`]
/// so newer documents still render as plain text containers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpanType {
    /// `BR`
    LineBreak,
    /// `ST`
    Strong,
    /// `EM`
    Emphasis,
    /// `DL`
    Strikethrough,
    /// `HL`
    Highlight,
    /// `CO`
    Code,
    /// `MN`
    Mention,
    /// `HT`
    Hashtag,
    /// `LN`
    Link,
    /// `IM`
    Image,
    /// `EX`
    Attachment,
    /// `BN`
    Button,
    /// `QQ`
    Quote,
    /// `FM`
    Form,
    /// `RW`
    Row,
    /// Any other tag.
    Unknown(String),
}

impl SpanType {
    /// The Drafty wire tag for this type.
    pub fn as_str(&self) -> &str {
        match self {
            SpanType::LineBreak => "BR",
            SpanType::Strong => "ST",
            SpanType::Emphasis => "EM",
            SpanType::Strikethrough => "DL",
            SpanType::Highlight => "HL",
            SpanType::Code => "CO",
            SpanType::Mention => "MN",
            SpanType::Hashtag => "HT",
            SpanType::Link => "LN",
            SpanType::Image => "IM",
            SpanType::Attachment => "EX",
            SpanType::Button => "BN",
            SpanType::Quote => "QQ",
            SpanType::Form => "FM",
            SpanType::Row => "RW",
            SpanType::Unknown(tag) => tag,
        }
    }
}

impl From<&str> for SpanType {
    fn from(tag: &str) -> Self {
        match tag {
            "BR" => SpanType::LineBreak,
            "ST" => SpanType::Strong,
            "EM" => SpanType::Emphasis,
            "DL" => SpanType::Strikethrough,
            "HL" => SpanType::Highlight,
            "CO" => SpanType::Code,
            "MN" => SpanType::Mention,
            "HT" => SpanType::Hashtag,
            "LN" => SpanType::Link,
            "IM" => SpanType::Image,
            "EX" => SpanType::Attachment,
            "BN" => SpanType::Button,
            "QQ" => SpanType::Quote,
            "FM" => SpanType::Form,
            "RW" => SpanType::Row,
            other => SpanType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for SpanType {
    fn from(tag: String) -> Self {
        SpanType::from(tag.as_str())
    }
}

impl From<SpanType> for String {
    fn from(tp: SpanType) -> Self {
        match tp {
            SpanType::Unknown(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SpanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a Drafty document tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Type tag; `None` for plain text.
    #[serde(default, alias = "type", skip_serializing_if = "Option::is_none")]
    pub tp: Option<SpanType>,
    /// Type-specific payload.
    #[serde(default, deserialize_with = "object_or_none", skip_serializing_if = "Option::is_none")]
    pub data: Option<Data>,
    /// Index into the document's entity table. Passed through untouched.
    #[serde(default, deserialize_with = "index_or_none", skip_serializing_if = "Option::is_none")]
    pub key: Option<usize>,
    /// Text run of a leaf span.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Span>,
}

impl Span {
    /// An untyped leaf carrying `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// An empty span of the given type.
    pub fn typed(tp: SpanType) -> Self {
        Self {
            tp: Some(tp),
            ..Self::default()
        }
    }

    /// An untyped container of `children`.
    pub fn group(children: Vec<Span>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Span>) -> Self {
        self.children = children;
        self
    }

    /// Set the data payload. Anything other than a JSON object clears it.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = match data {
            Value::Object(map) => Some(map),
            _ => None,
        };
        self
    }

    pub fn with_key(mut self, key: usize) -> Self {
        self.key = Some(key);
        self
    }

    /// Whether this span is a text leaf (no type, no children).
    pub fn is_text(&self) -> bool {
        self.tp.is_none() && self.children.is_empty()
    }
}

/// Accept any JSON for `data`, keeping it only when it is an object.
fn object_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Data>, D::Error> {
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    })
}

/// Accept any JSON for `key`, keeping it only when it is a non-negative integer.
fn index_or_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?
        .and_then(|value| value.as_u64())
        .and_then(|index| usize::try_from(index).ok()))
}

// ---------------------------------------------------------------------------
// Data accessors
// ---------------------------------------------------------------------------

/// A string field of a data payload.
pub(crate) fn data_str<'a>(data: &'a Data, key: &str) -> Option<&'a str> {
    data.get(key).and_then(Value::as_str)
}

/// A scalar field rendered as a string. Numbers and booleans are accepted
/// because button values and names are not always quoted by senders.
pub(crate) fn data_string(data: &Data, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A non-negative integer field, given either as a JSON number or a numeric string.
pub(crate) fn data_u64(data: &Data, key: &str) -> Option<u64> {
    match data.get(key)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

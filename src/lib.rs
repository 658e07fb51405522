// drafty-format — Drafty rich-text documents to styled render trees.
//
// Architecture:
//   Drafty JSON → serde → span tree → format::Engine → FormatNode tree → leaves()
//
// The engine walks the span tree bottom-up, dispatching each span to a
// formatter strategy. Quoted content is handed to a second strategy that
// renders a reduced, muted version of it.

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)*);
    }};
}
pub(crate) use debug;

pub mod attachment;
pub mod button;
pub mod drafty;
mod error;
pub mod format;
pub mod node;
pub mod palette;

use serde::Deserialize;

pub use attachment::{Attachment, AttachmentKind};
pub use drafty::{Data, Span, SpanType};
pub use error::DraftyFormatError;
pub use format::{
    DefaultFormatter, Engine, Formatter, QuoteFormatter, QuotePolicy, Reduce, SpanInfo,
    DEFAULT_MAX_DEPTH,
};
pub use node::{Color, Content, FormatNode, Leaf, LeafContent, StyleKey, StyleProperty, StyleSet};

/// Formatting options.
#[derive(Debug, Clone)]
pub struct Options {
    /// Rules for content inside quoted blocks. `None` renders quoted content
    /// with the default strategy.
    pub quote_policy: Option<QuotePolicy>,
    /// Nesting depth past which spans are flattened to plain text.
    pub max_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            quote_policy: Some(QuotePolicy::default()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Options {
    /// Create a new Options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rules for quoted content.
    pub fn with_quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.quote_policy = Some(policy);
        self
    }

    /// Render quoted content like any other content.
    pub fn without_quote_policy(mut self) -> Self {
        self.quote_policy = None;
        self
    }

    /// Set the maximum nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Format a span tree using default options.
///
/// # Examples
///
/// ```
/// use drafty_format::{format, Span, SpanType};
///
/// let doc = Span::typed(SpanType::Strong).with_children(vec![Span::text("Hello")]);
/// let node = format(&doc);
/// assert_eq!(node.plain_text(), "Hello");
/// ```
pub fn format(root: &Span) -> FormatNode {
    format_with(root, &Options::default())
}

/// Format a span tree with custom options.
pub fn format_with(root: &Span, options: &Options) -> FormatNode {
    let quoted = options.quote_policy.clone().map(QuoteFormatter::new);
    let mut engine = Engine::new(&DefaultFormatter).with_max_depth(options.max_depth);
    if let Some(quoted) = &quoted {
        engine = engine.with_quote_formatter(quoted);
    }
    engine.transform(root)
}

/// Parse a Drafty JSON tree.
///
/// Fails with [`DraftyFormatError::MissingRoot`] when the JSON is `null`.
/// Nesting depth is not limited here; deep trees are flattened by the
/// engine instead.
pub fn parse_document(json: &str) -> Result<Span, DraftyFormatError> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let root = Option::<Span>::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    root.ok_or(DraftyFormatError::MissingRoot)
}

/// Convert an already-parsed JSON value into a span tree.
pub fn document_from_value(value: serde_json::Value) -> Result<Span, DraftyFormatError> {
    if value.is_null() {
        return Err(DraftyFormatError::MissingRoot);
    }
    Ok(serde_json::from_value(value)?)
}

/// Parse and format a Drafty JSON tree using default options.
///
/// # Examples
///
/// ```
/// let node = drafty_format::format_json(r#"{"children":[{"text":"hi"}]}"#).unwrap();
/// assert_eq!(node.plain_text(), "hi");
/// ```
pub fn format_json(json: &str) -> Result<FormatNode, DraftyFormatError> {
    format_json_with(json, &Options::default())
}

/// Parse and format a Drafty JSON tree with custom options.
pub fn format_json_with(json: &str, options: &Options) -> Result<FormatNode, DraftyFormatError> {
    let root = parse_document(json)?;
    Ok(format_with(&root, options))
}

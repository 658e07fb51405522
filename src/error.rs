/// Errors that can occur before a document reaches the formatter.
///
/// Formatting itself never fails; malformed spans degrade to plain content.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DraftyFormatError {
    /// The caller supplied no document (`null` root).
    #[error("document root is missing")]
    MissingRoot,
    #[error("Drafty parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for DraftyFormatError {
    fn from(err: serde_json::Error) -> Self {
        DraftyFormatError::Parse(err.to_string())
    }
}

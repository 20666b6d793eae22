use thiserror::Error;

/// Core error type shared across copylint crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The content document could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// The content document is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// The document parsed but is not a content tree.
    #[error("invalid content: {0}")]
    InvalidContent(String),
}

/// Convenience alias for results returned by copylint crates.
pub type Result<T> = std::result::Result<T, CoreError>;

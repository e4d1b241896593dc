//! Error types for zen-reader.
//!
//! Extraction itself never fails with an error: a page without readable
//! content yields `None`. These errors cover the configurable tables, the
//! preference store and failures raised by injected external extractors.

/// Error type for configuration, persistence and external extractor operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configurable pattern table produced an invalid regular expression.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Reading or writing a preference file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A preference record or host command could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored preference value was rejected.
    #[error("invalid preference `{key}`: {reason}")]
    Preferences { key: String, reason: String },

    /// An external extractor raised instead of returning an article.
    #[error("external extractor failed: {0}")]
    ExternalExtractor(String),
}

/// Result type alias for zen-reader operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the showcase host.

use showcase_search::SearchError;

/// Top-level error type for the showcase host.
#[derive(Debug, thiserror::Error)]
pub enum ShowcaseError {
    /// Configuration file missing fields, malformed, or failing validation.
    #[error("config error: {0}")]
    Config(String),

    /// Logging could not be initialised.
    #[error("logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A search failed. Upstream causes are never included.
    #[error(transparent)]
    Search(#[from] SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ShowcaseError>;

//! Error types for the showcase-search crate.
//!
//! [`SearchError`] is what callers see. Its `Upstream` variant carries no
//! cause on purpose: backend details stay in logs and telemetry.
//! [`BackendError`] is what collaborators return to the orchestrator.

/// Errors surfaced to the owning transport layer.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Embedding generation, a search backend, or the count failed.
    #[error("search failed")]
    Upstream,

    /// The request is malformed (bad page size, oversized query, inverted date range).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for showcase-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Failures reported by external collaborators.
///
/// Never shown to callers; the orchestrator folds these into
/// [`SearchError::Upstream`] after logging them.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    /// The embedding generator could not embed the query text.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// The vector store rejected or failed the semantic query.
    #[error("semantic search error: {0}")]
    SemanticSearch(String),

    /// The lexical index rejected or failed the keyword query.
    #[error("keyword search error: {0}")]
    KeywordSearch(String),

    /// The authoritative count could not be computed.
    #[error("count error: {0}")]
    Count(String),

    /// The metrics sink could not record an event.
    #[error("metrics error: {0}")]
    Metrics(String),

    /// The collaborator is not reachable at all.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

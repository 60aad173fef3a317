//! Trait definitions for the external collaborators the search core consumes.
//!
//! Each collaborator is held as an `Arc<dyn …>` constructed once at process
//! start and injected into the
//! [`SearchOrchestrator`](crate::orchestrator::SearchOrchestrator). Connection
//! pooling and retries, if any, live inside the implementations.
//!
//! All implementations must be `Send + Sync` so that the semantic, keyword and
//! count calls of one search can run concurrently.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::filter::FilterBag;
use crate::telemetry::SearchEvent;
use crate::types::{KeywordMatch, SemanticMatch};

/// Turns query text into an embedding vector.
#[async_trait]
pub trait EmbeddingGenerator: Send + Sync {
    /// Embed `text`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the model cannot produce an embedding.
    async fn generate(&self, text: &str) -> Result<Vec<f32>, BackendError>;
}

/// Vector store returning the top [`FilterBag::window`] semantic matches.
#[async_trait]
pub trait VectorSearchRepository: Send + Sync {
    /// Run a similarity search. Similarities must already be in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the store query fails.
    async fn semantic_search(
        &self,
        embedding: &[f32],
        filters: &FilterBag,
    ) -> Result<Vec<SemanticMatch>, BackendError>;
}

/// Lexical index returning the top [`FilterBag::window`] keyword matches.
#[async_trait]
pub trait LexicalSearchRepository: Send + Sync {
    /// Run a keyword search. Ranks must already be in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the index query fails.
    async fn keyword_search(
        &self,
        query: &str,
        filters: &FilterBag,
    ) -> Result<Vec<KeywordMatch>, BackendError>;
}

/// Source of the authoritative total for a filter set.
///
/// The total is independent of the bounded windows the search backends
/// return, so it is never derived from fused results.
#[async_trait]
pub trait CountRepository: Send + Sync {
    /// Count every item matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] if the count cannot be computed.
    async fn count_search_results(&self, filters: &FilterBag) -> Result<u64, BackendError>;
}

/// Best-effort destination for search telemetry.
///
/// Failures are logged by the reporter and otherwise ignored.
#[async_trait]
pub trait MetricsSink: Send + Sync {
    /// Record one event.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Metrics`] if the event could not be stored.
    async fn record(&self, event: SearchEvent) -> Result<(), BackendError>;
}

/// A sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetricsSink;

#[async_trait]
impl MetricsSink for NoopMetricsSink {
    async fn record(&self, _event: SearchEvent) -> Result<(), BackendError> {
        Ok(())
    }
}

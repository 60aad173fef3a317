//! # showcase-search
//!
//! Hybrid search over community showcase content.
//!
//! Every search issues a semantic (vector) query and a lexical (keyword)
//! query against the same corpus, fuses their scores as
//! `0.7 * similarity + 0.3 * rank`, deduplicates by content id, and pages the
//! ranking against an authoritative count obtained separately.
//!
//! ## Design
//!
//! - Visibility is derived per caller: `public` for everyone, `aws_community`
//!   for authenticated badge holders, `aws_only` for AWS employees. `private`
//!   content is never searchable here.
//! - Empty queries and callers with no visible tiers short-circuit to an empty
//!   page without touching any collaborator.
//! - Semantic search, keyword search and the count run concurrently.
//! - Collaborators (embedding model, vector store, lexical index, counter,
//!   metrics sink) are traits injected once as `Arc<dyn …>`.
//! - Telemetry is fire-and-forget on a detached task and can never change a
//!   search outcome.
//!
//! ## Errors
//!
//! Any collaborator failure surfaces as the single, detail-free
//! [`SearchError::Upstream`]; causes only reach logs and telemetry. Search
//! queries are logged only at trace level.

pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod orchestrator;
pub mod telemetry;
pub mod types;
pub mod visibility;

pub use backend::{
    CountRepository, EmbeddingGenerator, LexicalSearchRepository, MetricsSink, NoopMetricsSink,
    VectorSearchRepository,
};
pub use config::SearchConfig;
pub use error::{BackendError, Result, SearchError};
pub use filter::FilterBag;
pub use orchestrator::{Collaborators, SearchOrchestrator};
pub use telemetry::{ErrorCategory, SearchEvent, TelemetryReporter};
pub use types::{
    BadgeType, CallerContext, Content, ContentType, DateRange, FusedResult, KeywordMatch,
    SearchFilters, SearchRequest, SearchResult, SemanticMatch, Visibility,
};
pub use visibility::{permitted_visibility, PermittedTiers, VisibilityAccess};

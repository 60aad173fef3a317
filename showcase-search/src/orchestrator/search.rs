//! Core search orchestrator: visibility, concurrent fan-out, fusion, paging.
//!
//! # Pipeline
//!
//! ```text
//! INIT ──empty query──────────────► SHORT_CIRCUIT_EMPTY
//!   │ ──no visible tiers──────────► SHORT_CIRCUIT_EMPTY
//!   ▼
//! VALIDATED ─► FUSING + COUNTING (concurrent) ─► PAGINATED ─► DONE
//!                     │
//!                     └── any collaborator fails ──► FAILED
//! ```
//!
//! Short-circuits make no collaborator calls at all. `DONE` and `FAILED`
//! both dispatch telemetry without awaiting it. `FAILED` surfaces as a
//! single [`SearchError::Upstream`] with the cause kept out of the error.

use std::sync::Arc;
use std::time::Instant;

use tracing::Instrument;

use crate::backend::{
    CountRepository, EmbeddingGenerator, LexicalSearchRepository, MetricsSink,
    VectorSearchRepository,
};
use crate::cache::EmbeddingCache;
use crate::config::SearchConfig;
use crate::error::{BackendError, Result, SearchError};
use crate::filter::FilterBag;
use crate::telemetry::{ErrorCategory, SearchEvent, TelemetryReporter};
use crate::types::{CallerContext, FusedResult, SearchRequest, SearchResult};
use crate::visibility::{permitted_visibility, VisibilityAccess};

use super::fusion::fuse;
use super::paginate::paginate;

/// Collaborator handles, constructed once at process start.
#[derive(Clone)]
pub struct Collaborators {
    pub embedder: Arc<dyn EmbeddingGenerator>,
    pub vectors: Arc<dyn VectorSearchRepository>,
    pub lexical: Arc<dyn LexicalSearchRepository>,
    pub counter: Arc<dyn CountRepository>,
    pub metrics: Arc<dyn MetricsSink>,
}

/// Entry point for hybrid search. Holds no per-request state.
pub struct SearchOrchestrator {
    config: SearchConfig,
    embedder: Arc<dyn EmbeddingGenerator>,
    vectors: Arc<dyn VectorSearchRepository>,
    lexical: Arc<dyn LexicalSearchRepository>,
    counter: Arc<dyn CountRepository>,
    telemetry: TelemetryReporter,
    embedding_cache: Option<EmbeddingCache>,
}

impl SearchOrchestrator {
    /// Build an orchestrator over injected collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if `config` fails validation.
    pub fn new(config: SearchConfig, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;
        let telemetry = TelemetryReporter::new(collaborators.metrics, config.telemetry_timeout());
        let embedding_cache = EmbeddingCache::from_config(&config);
        Ok(Self {
            config,
            embedder: collaborators.embedder,
            vectors: collaborators.vectors,
            lexical: collaborators.lexical,
            counter: collaborators.counter,
            telemetry,
            embedding_cache,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run one search for `context`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidRequest`] for a bad page size, an oversized
    ///   query or an inverted date range. No collaborator is called. A blank
    ///   query is never rejected: it returns an empty page echoing the
    ///   requested window.
    /// - [`SearchError::Upstream`] if embedding, either search, or the count
    ///   fails. No partial page is returned.
    pub async fn search(
        &self,
        request: &SearchRequest,
        context: &CallerContext,
    ) -> Result<SearchResult> {
        let limit = request.limit.unwrap_or(self.config.default_limit);
        let offset = request.offset.unwrap_or(0);
        let span = tracing::debug_span!("hybrid_search", limit, offset);
        self.run(request, context, limit, offset)
            .instrument(span)
            .await
    }

    async fn run(
        &self,
        request: &SearchRequest,
        context: &CallerContext,
        limit: usize,
        offset: usize,
    ) -> Result<SearchResult> {
        let started = Instant::now();

        let query = request.query.trim();
        if query.is_empty() {
            tracing::debug!(phase = "short_circuit_empty", reason = "empty_query");
            return Ok(self.short_circuit(limit, offset, started));
        }
        self.validate_request(request, limit)?;

        let requested = request
            .filters
            .as_ref()
            .and_then(|f| f.visibility.as_deref());
        let tiers = match permitted_visibility(context, requested) {
            VisibilityAccess::Tiers(tiers) => tiers,
            VisibilityAccess::NoAccess => {
                tracing::debug!(phase = "short_circuit_empty", reason = "no_access");
                return Ok(self.short_circuit(limit, offset, started));
            }
        };

        let filters = FilterBag::new(
            query,
            tiers,
            request.filters.as_ref(),
            offset.saturating_add(limit),
        );
        tracing::debug!(
            phase = "validated",
            tiers = filters.visibility().len(),
            window = filters.window()
        );
        tracing::trace!(query = filters.query(), "hybrid search query");

        match self.fetch(&filters).await {
            Ok((fused, total)) => {
                let page = paginate(fused, total, limit, offset);
                tracing::debug!(
                    phase = "done",
                    items = page.items.len(),
                    total = page.total
                );
                self.telemetry.record(SearchEvent::Completed {
                    latency_ms: elapsed_ms(started),
                    result_count: page.items.len(),
                    total: page.total,
                    visibility: filters.visibility().to_vec(),
                    short_circuit: false,
                });
                Ok(page)
            }
            Err(category) => {
                tracing::debug!(phase = "failed", %category);
                self.telemetry.record(SearchEvent::Failed {
                    latency_ms: elapsed_ms(started),
                    category,
                });
                Err(SearchError::Upstream)
            }
        }
    }

    /// FUSING and COUNTING: run the semantic branch, the keyword search and
    /// the count concurrently, then fuse.
    ///
    /// When several collaborators fail, the reported category follows the
    /// fixed order embedding, semantic, keyword, count.
    async fn fetch(
        &self,
        filters: &FilterBag,
    ) -> std::result::Result<(Vec<FusedResult>, u64), ErrorCategory> {
        tracing::debug!(phase = "fusing");

        let semantic = async {
            let embedding = self
                .embed(filters.query())
                .await
                .map_err(|e| (ErrorCategory::Embedding, e))?;
            self.vectors
                .semantic_search(&embedding, filters)
                .await
                .map_err(|e| (ErrorCategory::SemanticSearch, e))
        };
        let keyword = async {
            self.lexical
                .keyword_search(filters.query(), filters)
                .await
                .map_err(|e| (ErrorCategory::KeywordSearch, e))
        };
        let count = async {
            self.counter
                .count_search_results(filters)
                .await
                .map_err(|e| (ErrorCategory::Count, e))
        };

        let (semantic, keyword, total) = futures::future::join3(semantic, keyword, count).await;

        for (category, err) in [
            semantic.as_ref().err(),
            keyword.as_ref().err(),
            total.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        {
            tracing::warn!(%category, error = %err, "search collaborator failed");
        }

        let (semantic, keyword, total) = match (semantic, keyword, total) {
            (Ok(s), Ok(k), Ok(t)) => (s, k, t),
            (Err((category, _)), _, _)
            | (_, Err((category, _)), _)
            | (_, _, Err((category, _))) => return Err(category),
        };

        tracing::debug!(
            phase = "counting",
            semantic = semantic.len(),
            keyword = keyword.len(),
            total
        );
        Ok((fuse(semantic, keyword), total))
    }

    async fn embed(&self, query: &str) -> std::result::Result<Arc<Vec<f32>>, BackendError> {
        match &self.embedding_cache {
            Some(cache) => cache.get_or_generate(query, self.embedder.as_ref()).await,
            None => self.embedder.generate(query).await.map(Arc::new),
        }
    }

    fn short_circuit(&self, limit: usize, offset: usize, started: Instant) -> SearchResult {
        self.telemetry.record(SearchEvent::Completed {
            latency_ms: elapsed_ms(started),
            result_count: 0,
            total: 0,
            visibility: Vec::new(),
            short_circuit: true,
        });
        SearchResult::empty(limit, offset)
    }

    /// Reject a malformed non-empty request before any collaborator call.
    fn validate_request(&self, request: &SearchRequest, limit: usize) -> Result<()> {
        if limit == 0 || limit > self.config.max_limit {
            return Err(SearchError::InvalidRequest(format!(
                "limit must be between 1 and {}",
                self.config.max_limit
            )));
        }
        if request.query.trim().chars().count() > self.config.max_query_chars {
            return Err(SearchError::InvalidRequest(format!(
                "query must be at most {} characters",
                self.config.max_query_chars
            )));
        }
        if let Some(range) = request.filters.as_ref().and_then(|f| f.date_range) {
            if range.start > range.end {
                return Err(SearchError::InvalidRequest(
                    "date range start must not be after end".into(),
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for SearchOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchOrchestrator")
            .field("config", &self.config)
            .field("embedding_cache", &self.embedding_cache)
            .finish_non_exhaustive()
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

//! Host-side entry point wiring configuration to the search orchestrator.

use std::sync::Arc;

use showcase_search::{
    CallerContext, Collaborators, CountRepository, EmbeddingGenerator, LexicalSearchRepository,
    SearchOrchestrator, SearchRequest, SearchResult, VectorSearchRepository,
};

use crate::config::ShowcaseConfig;
use crate::error::Result;
use crate::metrics::build_sink;

/// Search backends supplied by the deployment. The metrics sink is chosen
/// from configuration.
#[derive(Clone)]
pub struct Backends {
    pub embedder: Arc<dyn EmbeddingGenerator>,
    pub vectors: Arc<dyn VectorSearchRepository>,
    pub lexical: Arc<dyn LexicalSearchRepository>,
    pub counter: Arc<dyn CountRepository>,
}

/// Long-lived search service. Cheap to share behind an `Arc`.
pub struct SearchService {
    orchestrator: SearchOrchestrator,
}

impl SearchService {
    /// Build a service over fully injected collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ShowcaseError::Config`] if `config` fails validation.
    pub fn new(config: &ShowcaseConfig, collaborators: Collaborators) -> Result<Self> {
        config.validate()?;
        let orchestrator = SearchOrchestrator::new(config.search.clone(), collaborators)?;
        tracing::debug!(
            default_limit = config.search.default_limit,
            max_limit = config.search.max_limit,
            "search service ready"
        );
        Ok(Self { orchestrator })
    }

    /// Build a service whose metrics sink comes from `config.metrics`.
    ///
    /// # Errors
    ///
    /// Same as [`SearchService::new`].
    pub fn from_config(config: &ShowcaseConfig, backends: Backends) -> Result<Self> {
        let collaborators = Collaborators {
            embedder: backends.embedder,
            vectors: backends.vectors,
            lexical: backends.lexical,
            counter: backends.counter,
            metrics: build_sink(&config.metrics),
        };
        Self::new(config, collaborators)
    }

    /// Run one hybrid search on behalf of `context`.
    ///
    /// # Errors
    ///
    /// [`crate::ShowcaseError::Search`] wrapping the orchestrator's error.
    pub async fn search(
        &self,
        request: &SearchRequest,
        context: &CallerContext,
    ) -> Result<SearchResult> {
        Ok(self.orchestrator.search(request, context).await?)
    }

    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.orchestrator
    }
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService")
            .field("config", self.orchestrator.config())
            .finish_non_exhaustive()
    }
}

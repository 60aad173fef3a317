//! In-memory cache of query embeddings.
//!
//! Embedding the query is the only caller-independent step of a search, so
//! it is the only thing cached: fused pages depend on the caller's
//! visibility and are always recomputed. Each orchestrator owns its cache;
//! there is no process-wide instance. Uses [`moka`] for async-friendly
//! caching with TTL and automatic eviction.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;

use crate::backend::EmbeddingGenerator;
use crate::config::SearchConfig;
use crate::error::BackendError;

/// Bounded, TTL-limited map from query text to its embedding.
#[derive(Clone)]
pub struct EmbeddingCache {
    inner: Cache<String, Arc<Vec<f32>>>,
}

impl EmbeddingCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Build a cache from `config`, or `None` when caching is disabled.
    pub fn from_config(config: &SearchConfig) -> Option<Self> {
        config.embedding_cache_enabled().then(|| {
            Self::new(
                config.embedding_cache_capacity,
                Duration::from_secs(config.embedding_cache_ttl_seconds),
            )
        })
    }

    /// Look up a cached embedding for `query`.
    pub async fn get(&self, query: &str) -> Option<Arc<Vec<f32>>> {
        self.inner.get(&cache_key(query)).await
    }

    pub async fn insert(&self, query: &str, embedding: Arc<Vec<f32>>) {
        self.inner.insert(cache_key(query), embedding).await;
    }

    /// Return the cached embedding or generate, store and return a new one.
    ///
    /// The generator receives the normalised key, not the raw query.
    /// Generation failures are returned as-is and never cached.
    pub async fn get_or_generate(
        &self,
        query: &str,
        generator: &dyn EmbeddingGenerator,
    ) -> Result<Arc<Vec<f32>>, BackendError> {
        let key = cache_key(query);
        if let Some(hit) = self.inner.get(&key).await {
            tracing::trace!("query embedding cache hit");
            return Ok(hit);
        }
        let embedding = Arc::new(generator.generate(&key).await?);
        self.inner.insert(key, Arc::clone(&embedding)).await;
        Ok(embedding)
    }
}

impl std::fmt::Debug for EmbeddingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingCache")
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

/// Collapse runs of whitespace so trivially different spellings share a key.
/// Case is preserved: embedding models are case-sensitive.
fn cache_key(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ")
}

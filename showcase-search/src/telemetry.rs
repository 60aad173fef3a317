//! Fire-and-forget search telemetry.
//!
//! [`TelemetryReporter::record`] hands each [`SearchEvent`] to a detached
//! `tokio` task. The search path never awaits that task, and anything the
//! sink does wrong (error, timeout, panic) ends inside it: errors and
//! timeouts are logged at warn level, panics are contained by the task.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::backend::MetricsSink;
use crate::types::Visibility;

/// Coarse failure bucket reported for failed searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Embedding,
    SemanticSearch,
    KeywordSearch,
    Count,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Embedding => "embedding",
            Self::SemanticSearch => "semantic_search",
            Self::KeywordSearch => "keyword_search",
            Self::Count => "count",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One telemetry record per search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    /// The search returned a page (possibly via a short-circuit).
    Completed {
        latency_ms: u64,
        result_count: usize,
        total: u64,
        /// Tiers the search ran against; empty for short-circuits.
        visibility: Vec<Visibility>,
        /// `true` when no collaborator was called (empty query or no access).
        short_circuit: bool,
    },
    /// An upstream collaborator failed.
    Failed {
        latency_ms: u64,
        category: ErrorCategory,
    },
}

/// Non-blocking front end to a [`MetricsSink`].
#[derive(Clone)]
pub struct TelemetryReporter {
    sink: Arc<dyn MetricsSink>,
    timeout: Duration,
}

impl TelemetryReporter {
    /// `timeout` bounds how long the detached task waits on the sink.
    pub fn new(sink: Arc<dyn MetricsSink>, timeout: Duration) -> Self {
        Self { sink, timeout }
    }

    /// Dispatch `event` to the sink on a detached task and return immediately.
    ///
    /// The handle is returned for tests and diagnostics; production callers
    /// drop it. Returns `None` (dropping the event) when called outside a
    /// `tokio` runtime.
    pub fn record(&self, event: SearchEvent) -> Option<JoinHandle<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::debug!("no async runtime; search telemetry event dropped");
            return None;
        };

        let sink = Arc::clone(&self.sink);
        let timeout = self.timeout;
        Some(runtime.spawn(async move {
            match tokio::time::timeout(timeout, sink.record(event)).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::warn!(error = %err, "metrics sink failed; search event dropped");
                }
                Err(_) => {
                    tracing::warn!(
                        timeout_ms = timeout.as_millis() as u64,
                        "metrics sink timed out; search event dropped"
                    );
                }
            }
        }))
    }
}

impl std::fmt::Debug for TelemetryReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryReporter")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

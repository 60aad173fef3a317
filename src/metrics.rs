//! Concrete [`MetricsSink`] implementations for search telemetry.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use showcase_search::{BackendError, MetricsSink, NoopMetricsSink, SearchEvent};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::config::{MetricsConfig, MetricsSinkKind, ShowcaseConfig};

/// Emits every event as a structured `info` log line on the
/// `showcase::metrics` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingMetricsSink;

#[async_trait]
impl MetricsSink for TracingMetricsSink {
    async fn record(&self, event: SearchEvent) -> Result<(), BackendError> {
        match event {
            SearchEvent::Completed {
                latency_ms,
                result_count,
                total,
                visibility,
                short_circuit,
            } => {
                let tiers: Vec<&str> = visibility.iter().map(|v| v.as_str()).collect();
                tracing::info!(
                    target: "showcase::metrics",
                    latency_ms,
                    result_count,
                    total,
                    visibility = ?tiers,
                    short_circuit,
                    "search completed"
                );
            }
            SearchEvent::Failed {
                latency_ms,
                category,
            } => {
                tracing::info!(
                    target: "showcase::metrics",
                    latency_ms,
                    category = %category,
                    "search failed"
                );
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonlRecord<'a> {
    recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    event: &'a SearchEvent,
}

/// Appends one JSON object per event to a file.
///
/// Each line carries a `recorded_at` timestamp next to the event fields.
/// Writes are serialised so concurrent searches never interleave lines.
#[derive(Debug)]
pub struct JsonlMetricsSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlMetricsSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, line: &[u8]) -> std::io::Result<()> {
        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line).await?;
        file.flush().await
    }
}

#[async_trait]
impl MetricsSink for JsonlMetricsSink {
    async fn record(&self, event: SearchEvent) -> Result<(), BackendError> {
        let record = JsonlRecord {
            recorded_at: Utc::now(),
            event: &event,
        };
        let mut line =
            serde_json::to_vec(&record).map_err(|e| BackendError::Metrics(e.to_string()))?;
        line.push(b'\n');
        self.append(&line).await.map_err(|e| {
            BackendError::Metrics(format!("append to {}: {e}", self.path.display()))
        })
    }
}

/// Build the sink selected by `config`.
pub fn build_sink(config: &MetricsConfig) -> Arc<dyn MetricsSink> {
    match config.sink {
        MetricsSinkKind::Tracing => Arc::new(TracingMetricsSink),
        MetricsSinkKind::Jsonl => {
            let path = config
                .jsonl_path
                .clone()
                .unwrap_or_else(ShowcaseConfig::default_metrics_path);
            Arc::new(JsonlMetricsSink::new(path))
        }
        MetricsSinkKind::None => Arc::new(NoopMetricsSink),
    }
}

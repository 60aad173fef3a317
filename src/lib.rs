//! Showcase search host.
//!
//! Wraps the [`showcase_search`] orchestrator with the pieces a deployment
//! needs around it: a TOML configuration file, a `tracing` subscriber and
//! concrete metrics sinks. Backends (embedding model, vector store, lexical
//! index, counter) are injected by the embedding application.

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod service;

pub use config::{LoggingConfig, MetricsConfig, MetricsSinkKind, ShowcaseConfig};
pub use error::{Result, ShowcaseError};
pub use metrics::{build_sink, JsonlMetricsSink, TracingMetricsSink};
pub use service::{Backends, SearchService};
pub use showcase_search;

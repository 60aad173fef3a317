//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls page sizes, query limits, telemetry dispatch and
//! the query-embedding cache. It is embedded as the `[search]` table of the
//! host configuration file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Configuration for the search orchestrator.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size used when a request omits `limit`.
    pub default_limit: usize,
    /// Largest page size a request may ask for.
    pub max_limit: usize,
    /// Maximum length of the trimmed query, in characters.
    pub max_query_chars: usize,
    /// How long a detached telemetry task may wait on the metrics sink.
    pub telemetry_timeout_ms: u64,
    /// Maximum number of cached query embeddings. Set to 0 to disable caching.
    pub embedding_cache_capacity: u64,
    /// How long a cached query embedding stays valid, in seconds.
    /// Set to 0 to disable caching.
    pub embedding_cache_ttl_seconds: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
            max_query_chars: 512,
            telemetry_timeout_ms: 2_000,
            embedding_cache_capacity: 256,
            embedding_cache_ttl_seconds: 300,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `default_limit` and `max_limit` must be greater than 0
    /// - `default_limit` must be <= `max_limit`
    /// - `max_query_chars` must be greater than 0
    /// - `telemetry_timeout_ms` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.default_limit == 0 {
            return Err(SearchError::Config(
                "default_limit must be greater than 0".into(),
            ));
        }
        if self.max_limit == 0 {
            return Err(SearchError::Config("max_limit must be greater than 0".into()));
        }
        if self.default_limit > self.max_limit {
            return Err(SearchError::Config(
                "default_limit must be <= max_limit".into(),
            ));
        }
        if self.max_query_chars == 0 {
            return Err(SearchError::Config(
                "max_query_chars must be greater than 0".into(),
            ));
        }
        if self.telemetry_timeout_ms == 0 {
            return Err(SearchError::Config(
                "telemetry_timeout_ms must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Whether the query-embedding cache should be built.
    pub fn embedding_cache_enabled(&self) -> bool {
        self.embedding_cache_capacity > 0 && self.embedding_cache_ttl_seconds > 0
    }

    pub fn telemetry_timeout(&self) -> Duration {
        Duration::from_millis(self.telemetry_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = SearchConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.max_limit, 100);
        assert_eq!(config.max_query_chars, 512);
        assert_eq!(config.telemetry_timeout(), Duration::from_secs(2));
        assert!(config.embedding_cache_enabled());
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_default_limit_rejected() {
        let config = SearchConfig {
            default_limit: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_limit"));
    }

    #[test]
    fn zero_max_limit_rejected() {
        let config = SearchConfig {
            max_limit: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_limit"));
    }

    #[test]
    fn default_above_max_rejected() {
        let config = SearchConfig {
            default_limit: 50,
            max_limit: 10,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("<= max_limit"));
    }

    #[test]
    fn zero_query_chars_rejected() {
        let config = SearchConfig {
            max_query_chars: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_query_chars"));
    }

    #[test]
    fn zero_telemetry_timeout_rejected() {
        let config = SearchConfig {
            telemetry_timeout_ms: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("telemetry_timeout_ms"));
    }

    #[test]
    fn zero_ttl_disables_cache() {
        let config = SearchConfig {
            embedding_cache_ttl_seconds: 0,
            ..Default::default()
        };
        assert!(!config.embedding_cache_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_capacity_disables_cache() {
        let config = SearchConfig {
            embedding_cache_capacity: 0,
            ..Default::default()
        };
        assert!(!config.embedding_cache_enabled());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{"max_limit":50}"#).expect("deserialize");
        assert_eq!(config.max_limit, 50);
        assert_eq!(config.default_limit, 20);
    }
}

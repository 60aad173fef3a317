//! Configuration file for the showcase host.
//!
//! The file is TOML with one table per concern:
//!
//! ```toml
//! [search]
//! default_limit = 20
//! max_limit = 100
//!
//! [logging]
//! level = "info"
//!
//! [metrics]
//! sink = "jsonl"
//! jsonl_path = "/var/log/showcase/search-events.jsonl"
//! ```
//!
//! Missing tables and fields fall back to their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use showcase_search::SearchConfig;

use crate::error::{Result, ShowcaseError};

/// Top-level host configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Hybrid search tunables.
    pub search: SearchConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
    /// Where search telemetry goes.
    pub metrics: MetricsConfig,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set (e.g. `"info"`,
    /// `"showcase_search=debug"`).
    pub level: String,
    /// Emit ANSI colour codes.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            ansi: true,
        }
    }
}

/// Which metrics sink receives search telemetry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsSinkKind {
    /// Structured `info` log lines.
    #[default]
    Tracing,
    /// One JSON object per line appended to `jsonl_path`.
    Jsonl,
    /// Drop every event.
    None,
}

/// Metrics sink settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub sink: MetricsSinkKind,
    /// Target file for [`MetricsSinkKind::Jsonl`]. Defaults to
    /// `search-events.jsonl` next to the config file.
    pub jsonl_path: Option<PathBuf>,
}

impl ShowcaseConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, cannot be parsed, or
    /// holds an invalid `[search]` table.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| ShowcaseError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ShowcaseError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check cross-field rules that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ShowcaseError::Config`] on the first violated rule.
    pub fn validate(&self) -> Result<()> {
        self.search
            .validate()
            .map_err(|e| ShowcaseError::Config(e.to_string()))?;
        if self.logging.level.trim().is_empty() {
            return Err(ShowcaseError::Config("logging.level must not be empty".into()));
        }
        Ok(())
    }

    /// Returns the default config file path.
    ///
    /// `$SHOWCASE_CONFIG_DIR/config.toml` when the variable is set, else
    /// `<platform config dir>/showcase/config.toml`.
    pub fn default_config_path() -> PathBuf {
        config_path_from(std::env::var_os("SHOWCASE_CONFIG_DIR").map(PathBuf::from))
    }

    /// Default location of the JSON-lines metrics file.
    pub fn default_metrics_path() -> PathBuf {
        Self::default_config_path()
            .parent()
            .map(|dir| dir.join("search-events.jsonl"))
            .unwrap_or_else(|| PathBuf::from("search-events.jsonl"))
    }
}

fn config_path_from(override_dir: Option<PathBuf>) -> PathBuf {
    let dir = override_dir.unwrap_or_else(|| {
        dirs::config_dir()
            .map(|d| d.join("showcase"))
            .unwrap_or_else(|| PathBuf::from("/tmp/showcase-config"))
    });
    dir.join("config.toml")
}

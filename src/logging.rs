//! Process-wide `tracing` subscriber.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{Result, ShowcaseError};

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `config.level` when set.
///
/// # Errors
///
/// Returns [`ShowcaseError::Logging`] if the configured level is not a valid
/// filter directive or a global subscriber is already installed.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|e| ShowcaseError::Logging(format!("invalid level {:?}: {e}", config.level)))?,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| ShowcaseError::Logging(e.to_string()))?;

    tracing::debug!(level = %config.level, "logging initialised");
    Ok(())
}

//! Tracing subscriber setup

use kinetic_core::{KineticError, KineticResult};
use tracing_subscriber::EnvFilter;

use crate::LoggingConfig;

/// Resolve the filter: `RUST_LOG` wins over the configured directive
pub fn env_filter(config: &LoggingConfig) -> KineticResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| KineticError::InvalidConfig(format!("log filter {:?}: {e}", config.filter))),
    }
}

/// Install the global subscriber
///
/// Fails with `ConfigViolation` when a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> KineticResult<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(config)?);
    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| KineticError::ConfigViolation(format!("tracing subscriber: {e}")))?;
    tracing::debug!(json = config.json, "tracing initialized");
    Ok(())
}

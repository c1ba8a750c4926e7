//! Startup orchestration.
//!
//! # Responsibilities
//! - Load configuration (or fall back to the built-in defaults)
//! - Build the process logger from `log_file` and `log_level`
//! - Hand both to the proxy core
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - No partial startup: a broken config file never degrades to defaults

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{default_config, load_config, ConfigError, RelayConfig};
use crate::observability::{new_logger, LogError, Logger};

/// Everything the proxy core needs to run.
#[derive(Debug, Clone)]
pub struct Runtime {
    pub config: Arc<RelayConfig>,
    pub logger: Logger,
}

/// Error type for startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Log(#[from] LogError),
}

/// Load the configuration and construct the logger.
///
/// With no path the relay runs on defaults.
pub fn bootstrap(config_path: Option<&Path>) -> Result<Runtime, StartupError> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => default_config(),
    };
    let logger = new_logger(&config.log_file, &config.log_level)?;

    let source = config_path.map_or_else(|| "defaults".to_string(), |p| p.display().to_string());
    logger.in_scope(|| {
        tracing::info!(
            source = %source,
            listen = %config.listen,
            servers = ?config.backends,
            timeout_ms = config.timeout,
            reconnect_interval_ms = config.reconnect_interval,
            cache_size = config.cache_size,
            switch_upstream_latency_ms = config.switch_latency,
            stats = config.stats_enabled(),
            "Configuration loaded"
        );
    });

    Ok(Runtime {
        config: Arc::new(config),
        logger,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_without_path_uses_defaults() {
        let runtime = bootstrap(None).unwrap();
        assert_eq!(*runtime.config, default_config());
        assert_eq!(runtime.logger.level(), crate::observability::Severity::Debug);
    }

    #[test]
    fn bootstrap_reports_missing_config() {
        let err = bootstrap(Some(Path::new("/nonexistent/relay.yaml"))).unwrap_err();
        match err {
            StartupError::Config(inner) => assert!(inner.is_read()),
            other => panic!("unexpected error: {other}"),
        }
    }
}

//! Tracing bootstrap
//!
//! Library code only emits `tracing` events; the embedding process decides
//! where they go by calling [`init_tracing`] once at startup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::AppError;

/// Install the global fmt subscriber described by `config`
///
/// `RUST_LOG` takes precedence over `config.level`. Fails with
/// [`AppError::Config`] if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).try_init()
    };

    result.map_err(|e| AppError::Config(format!("failed to initialize tracing: {}", e)))?;

    tracing::debug!(level = %config.level, json = config.json, "Tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        let config = LoggingConfig::default();

        // Only one global subscriber can ever be installed
        let _ = init_tracing(&config);

        let err = init_tracing(&config).unwrap_err();
        assert_eq!(err.error_code(), "config_error");
    }
}

//! Logging initialization
//!
//! Diagnostics go to stderr through tracing so the report on stdout stays
//! clean enough to pipe.

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::{
    config::LoggingConfig,
    error::{Result, SweepError},
};

/// Initialize the logging system based on configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = create_env_filter(&config.level)?;

    let registry = Registry::default().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let console_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_target(true);

            registry.with(console_layer).init();
        }
        _ => {
            let console_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false);

            registry.with(console_layer).init();
        }
    }

    Ok(())
}

/// Create environment filter from log level string; RUST_LOG still wins when
/// set
fn create_env_filter(level: &str) -> Result<EnvFilter> {
    let base_level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => return Err(SweepError::config(format!("invalid log level: {level}"))),
    };

    let filter = EnvFilter::builder()
        .with_default_directive(base_level.into())
        .from_env()
        .map_err(|e| SweepError::config(e.to_string()))?;

    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_filter_creation() {
        assert!(create_env_filter("info").is_ok());
        assert!(create_env_filter("WARN").is_ok());
    }

    #[test]
    fn test_invalid_log_level() {
        assert!(create_env_filter("loud").is_err());
    }
}

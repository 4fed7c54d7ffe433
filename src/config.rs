//! Configuration management
//!
//! Layers defaults, an optional TOML file, and environment variables
//! (prefixed with CIDRSWEEP_) into a single [`AppConfig`]. Probe timing is
//! fixed per run: it comes from configuration, not from CLI flags.

use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use tracing::{debug, info};

use crate::error::{Result, SweepError};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Probe invocation settings
    pub probe: ProbeConfig,
    /// Concurrency tuning
    pub performance: PerformanceConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Echo attempts per address (ping packet count)
    pub attempts: u32,
    /// Per-probe timeout in milliseconds; platforms that only accept whole
    /// seconds round this up
    pub timeout_ms: u64,
    /// Payload size in bytes
    pub payload_bytes: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    /// Maximum concurrent probe processes; blocks wider than /24 would
    /// otherwise exhaust the process table
    pub max_concurrent_probes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Logging level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty)
    pub format: String,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            attempts: 2,
            timeout_ms: 500,
            payload_bytes: 2,
        }
    }
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            max_concurrent_probes: 256,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            probe: ProbeConfig::default(),
            performance: PerformanceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let mut settings = config::Config::builder();

        // Start with default configuration
        settings = settings.add_source(config::Config::try_from(&Self::default())?);

        if config_path.exists() {
            debug!("loading configuration from {}", config_path.display());
            settings = settings.add_source(config::File::from(config_path));
        } else {
            debug!("no configuration file found, using defaults");
        }

        // Override with environment variables (prefixed with CIDRSWEEP_)
        settings = settings.add_source(
            config::Environment::with_prefix("CIDRSWEEP")
                .separator("__")
                .try_parsing(true),
        );

        let config: AppConfig = settings.build()?.try_deserialize()?;
        config.validate()?;

        info!("configuration loaded");
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.probe.attempts == 0 {
            return Err(SweepError::config("probe.attempts must be greater than 0"));
        }
        if self.probe.timeout_ms == 0 {
            return Err(SweepError::config("probe.timeout_ms must be greater than 0"));
        }
        if self.performance.max_concurrent_probes == 0 {
            return Err(SweepError::config(
                "performance.max_concurrent_probes must be greater than 0",
            ));
        }
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(SweepError::config(format!("invalid logging level: {other}")));
            }
        }
        Ok(())
    }
}

impl ProbeConfig {
    /// Probe timeout as a Duration, for platforms whose ping accepts
    /// milliseconds directly
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Wall-clock deadline for the whole probe invocation on platforms whose
    /// ping lacks a portable end-to-end timeout flag; whole seconds, rounded
    /// up because some pings reject fractional values
    pub fn enforced_deadline(&self) -> Duration {
        Duration::from_secs(self.timeout_ms.div_ceil(1000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.probe.attempts, 2);
        assert_eq!(config.probe.timeout_ms, 500);
        assert_eq!(config.probe.payload_bytes, 2);
    }

    #[test]
    fn test_deadline_rounds_up_to_whole_seconds() {
        let probe = ProbeConfig::default();
        assert_eq!(probe.enforced_deadline(), Duration::from_secs(1));

        let probe = ProbeConfig {
            timeout_ms: 2000,
            ..ProbeConfig::default()
        };
        assert_eq!(probe.enforced_deadline(), Duration::from_secs(2));

        let probe = ProbeConfig {
            timeout_ms: 2001,
            ..ProbeConfig::default()
        };
        assert_eq!(probe.enforced_deadline(), Duration::from_secs(3));
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let mut config = AppConfig::default();
        config.probe.attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }
}

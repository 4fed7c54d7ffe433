//! Error types for the sweep pipeline
//!
//! Only network parsing is surfaced to the user as a failure; everything
//! inside the concurrent scan degrades to a per-address probe status instead
//! of an error (see [`crate::probe::ProbeStatus`]).

use std::io;
use thiserror::Error;

/// Main result type used throughout the application
pub type Result<T> = std::result::Result<T, SweepError>;

#[derive(Error, Debug)]
pub enum SweepError {
    /// The CIDR string could not be parsed; aborts the run before any probing
    #[error("invalid network '{cidr}': {reason}")]
    InvalidNetwork { cidr: String, reason: String },

    /// Configuration load or validation errors
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Probe process errors; absorbed into an offline outcome by the
    /// dispatcher, never propagated past it
    #[error("probe error for {address}: {message}")]
    Probe { address: String, message: String },

    /// File and stdin I/O errors
    #[error("io error: {operation} - {message}")]
    Io { operation: String, message: String },
}

impl SweepError {
    pub fn invalid_network<C: Into<String>, R: Into<String>>(cidr: C, reason: R) -> Self {
        Self::InvalidNetwork {
            cidr: cidr.into(),
            reason: reason.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn probe<A: Into<String>, M: Into<String>>(address: A, message: M) -> Self {
        Self::Probe {
            address: address.into(),
            message: message.into(),
        }
    }

    pub fn io<O: Into<String>, M: Into<String>>(operation: O, message: M) -> Self {
        Self::Io {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// User-facing failures abort the whole run; everything else is absorbed
    /// locally
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidNetwork { .. })
    }
}

impl From<io::Error> for SweepError {
    fn from(error: io::Error) -> Self {
        Self::io("IO operation", error.to_string())
    }
}

impl From<config::ConfigError> for SweepError {
    fn from(error: config::ConfigError) -> Self {
        Self::config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_network_is_user_facing() {
        let error = SweepError::invalid_network("not-an-ip/40", "bad prefix");
        assert!(error.is_user_facing());
        assert!(error.to_string().contains("not-an-ip/40"));
    }

    #[test]
    fn test_probe_error_is_absorbed() {
        let error = SweepError::probe("10.0.0.1", "ping not found");
        assert!(!error.is_user_facing());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let error: SweepError = io_err.into();
        assert!(matches!(error, SweepError::Io { .. }));
    }
}

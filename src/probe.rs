//! Reachability probing via the system ping facility
//!
//! One external ping process per probe. The command shape differs by host
//! platform: Windows ping takes a millisecond wait flag and bounds its own
//! runtime, while Unix ping can block well past its nominal timeout, so
//! there the prober imposes a wall-clock deadline around the child itself.
//!
//! A probe never fails outward. Tool errors are kept distinct from "host did
//! not answer" as [`ProbeStatus::Failed`], but the report collapses both to
//! offline (see [`crate::report::partition`]).

use async_trait::async_trait;
use std::net::Ipv4Addr;
use std::process::{ExitStatus, Stdio};
use tokio::{process::Command, time::timeout};
use tracing::debug;

use crate::config::ProbeConfig;

/// Typed probe result; collapsed to a boolean only at the aggregator boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// Ping exited successfully
    Reachable,
    /// Ping ran but got no answer (nonzero exit or enforced deadline hit)
    Unreachable,
    /// The probe tool itself could not be run
    Failed,
}

/// Result of probing one address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub address: Ipv4Addr,
    pub status: ProbeStatus,
}

impl ProbeOutcome {
    /// Merge key within the subnet
    pub fn last_octet(&self) -> u8 {
        self.address.octets()[3]
    }

    /// Only a confirmed echo reply counts as online; tool failures are
    /// deliberately indistinguishable from silence in the report
    pub fn is_online(&self) -> bool {
        self.status == ProbeStatus::Reachable
    }
}

/// Determines reachability of a single address
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, address: Ipv4Addr) -> ProbeStatus;
}

/// Platform-specific ping command construction, selected once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeCommandBuilder {
    /// Ping bounds its own runtime via a wait-time flag (Windows)
    BuiltinWait,
    /// Ping has no portable end-to-end timeout flag; the prober enforces a
    /// deadline around the child (Unix)
    EnforcedDeadline,
}

impl ProbeCommandBuilder {
    pub fn detect() -> Self {
        if cfg!(windows) {
            Self::BuiltinWait
        } else {
            Self::EnforcedDeadline
        }
    }

    pub fn needs_deadline(self) -> bool {
        matches!(self, Self::EnforcedDeadline)
    }

    /// Argument vector for one probe of `address`
    pub fn arguments(self, config: &ProbeConfig, address: Ipv4Addr) -> Vec<String> {
        match self {
            Self::BuiltinWait => vec![
                "-n".to_string(),
                config.attempts.to_string(),
                "-w".to_string(),
                config.timeout_ms.to_string(),
                "-l".to_string(),
                config.payload_bytes.to_string(),
                address.to_string(),
            ],
            Self::EnforcedDeadline => vec![
                "-c".to_string(),
                config.attempts.to_string(),
                "-s".to_string(),
                config.payload_bytes.to_string(),
                address.to_string(),
            ],
        }
    }

    fn build(self, config: &ProbeConfig, address: Ipv4Addr) -> Command {
        let mut command = Command::new("ping");
        command
            .args(self.arguments(config, address))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        command
    }
}

/// [`Prober`] backed by the system ping executable
pub struct PingProber {
    config: ProbeConfig,
    builder: ProbeCommandBuilder,
}

impl PingProber {
    pub fn new(config: ProbeConfig) -> Self {
        Self {
            config,
            builder: ProbeCommandBuilder::detect(),
        }
    }

    async fn run(&self, address: Ipv4Addr) -> std::io::Result<ExitStatus> {
        let mut child = self.builder.build(&self.config, address).spawn()?;

        if self.builder.needs_deadline() {
            match timeout(self.config.enforced_deadline(), child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    // Ping blocked past its nominal timeout; kill it and
                    // report the killed status
                    let _ = child.kill().await;
                    child.wait().await
                }
            }
        } else {
            child.wait().await
        }
    }
}

#[async_trait]
impl Prober for PingProber {
    async fn probe(&self, address: Ipv4Addr) -> ProbeStatus {
        match self.run(address).await {
            Ok(status) if status.success() => ProbeStatus::Reachable,
            Ok(_) => ProbeStatus::Unreachable,
            Err(e) => {
                debug!(address = %address, error = %e, "probe tool failed to run");
                ProbeStatus::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ProbeConfig {
        ProbeConfig::default()
    }

    #[test]
    fn test_builtin_wait_arguments() {
        let address = Ipv4Addr::new(172, 31, 219, 81);
        let args = ProbeCommandBuilder::BuiltinWait.arguments(&config(), address);
        assert_eq!(args, ["-n", "2", "-w", "500", "-l", "2", "172.31.219.81"]);
        assert!(!ProbeCommandBuilder::BuiltinWait.needs_deadline());
    }

    #[test]
    fn test_enforced_deadline_arguments() {
        let address = Ipv4Addr::new(172, 31, 219, 81);
        let args = ProbeCommandBuilder::EnforcedDeadline.arguments(&config(), address);
        assert_eq!(args, ["-c", "2", "-s", "2", "172.31.219.81"]);
        assert!(ProbeCommandBuilder::EnforcedDeadline.needs_deadline());
    }

    #[test]
    fn test_outcome_accessors() {
        let outcome = ProbeOutcome {
            address: Ipv4Addr::new(172, 31, 219, 94),
            status: ProbeStatus::Reachable,
        };
        assert_eq!(outcome.last_octet(), 94);
        assert!(outcome.is_online());

        let failed = ProbeOutcome {
            address: Ipv4Addr::new(172, 31, 219, 94),
            status: ProbeStatus::Failed,
        };
        assert!(!failed.is_online());
    }

    #[test]
    fn test_detect_matches_platform() {
        let builder = ProbeCommandBuilder::detect();
        if cfg!(windows) {
            assert_eq!(builder, ProbeCommandBuilder::BuiltinWait);
        } else {
            assert_eq!(builder, ProbeCommandBuilder::EnforcedDeadline);
        }
    }
}

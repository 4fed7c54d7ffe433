//! Command-line interface definition

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cidrsweep",
    about = "Ping every address in a subnet and report liveness as compact ranges",
    long_about = "Enumerates all addresses in a CIDR block, probes each one concurrently \
                  via the system ping facility, and prints a range-compressed online/offline table"
)]
pub struct Cli {
    /// CIDR block to sweep (e.g. 172.31.219.80/28); prompted for on stdin
    /// when omitted
    pub cidr: Option<String>,

    #[arg(
        short = 'c',
        long,
        help = "Configuration file path",
        value_name = "FILE",
        default_value = "config.toml"
    )]
    pub config_path: PathBuf,

    #[arg(short = 'v', long, help = "Increase diagnostic verbosity", action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long, help = "Quiet mode (errors only on stderr)")]
    pub quiet: bool,
}

impl Cli {
    /// Validate CLI arguments and resolve conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.quiet && self.verbose > 0 {
            return Err("Cannot use both quiet and verbose modes".to_string());
        }
        Ok(())
    }

    /// Diagnostic log level implied by the flags, if they override the
    /// configured one
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.quiet {
            Some("error")
        } else {
            match self.verbose {
                0 => None,
                1 => Some("debug"),
                _ => Some("trace"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_cidr() {
        let cli = Cli::parse_from(["cidrsweep", "172.31.219.80/28"]);
        assert_eq!(cli.cidr.as_deref(), Some("172.31.219.80/28"));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cidr_optional() {
        let cli = Cli::parse_from(["cidrsweep"]);
        assert!(cli.cidr.is_none());
    }

    #[test]
    fn test_conflicting_verbosity() {
        let cli = Cli::parse_from(["cidrsweep", "-q", "-v", "10.0.0.0/24"]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_log_level_override() {
        assert_eq!(
            Cli::parse_from(["cidrsweep", "-q"]).log_level_override(),
            Some("error")
        );
        assert_eq!(
            Cli::parse_from(["cidrsweep", "-v"]).log_level_override(),
            Some("debug")
        );
        assert_eq!(
            Cli::parse_from(["cidrsweep", "-vv"]).log_level_override(),
            Some("trace")
        );
        assert_eq!(Cli::parse_from(["cidrsweep"]).log_level_override(), None);
    }
}

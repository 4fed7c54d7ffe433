//! Application orchestrator
//!
//! Wires the enumerator, dispatcher, and report pipeline together for one
//! sweep. Only a network parse failure is user-facing; it renders as a
//! framed error block on stdout and the process still exits normally.

use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::{
    cli::Cli,
    config::AppConfig,
    error::Result,
    network::Network,
    probe::PingProber,
    report,
    scanner::ScanDispatcher,
};

pub struct Application {
    dispatcher: ScanDispatcher<PingProber>,
}

impl Application {
    pub fn new(config: AppConfig) -> Self {
        let prober = PingProber::new(config.probe.clone());
        let dispatcher = ScanDispatcher::new(prober, config.performance.max_concurrent_probes);
        Self { dispatcher }
    }

    /// Run one sweep: resolve the CIDR from the CLI or an interactive
    /// prompt, scan, and print the report
    pub async fn run(&self, cli: Cli) -> Result<()> {
        let cidr = match cli.cidr {
            Some(cidr) => cidr,
            None => prompt_for_cidr().await?,
        };

        match self.sweep(cidr.trim()).await {
            Ok(report) => println!("{report}"),
            Err(e) if e.is_user_facing() => {
                println!("{}", report::render_error(&e.to_string()));
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }

    /// Scan one block and render its report. Parsing happens before any
    /// probe is dispatched, so an invalid network never starts a partial
    /// scan.
    async fn sweep(&self, cidr: &str) -> Result<String> {
        let network = Network::parse(cidr)?;
        info!(cidr = %network.cidr(), addresses = network.addresses().len(), "starting sweep");

        let outcomes = self.dispatcher.sweep(network.addresses()).await;
        let partition = report::partition(&outcomes);

        info!(
            online = partition.online.len(),
            offline = partition.offline.len(),
            "sweep complete"
        );
        Ok(report::render_report(&network, &partition))
    }
}

async fn prompt_for_cidr() -> Result<String> {
    print!("CIDR Net:\t");
    std::io::stdout().flush()?;

    let mut line = String::new();
    let mut reader = BufReader::new(tokio::io::stdin());
    reader.read_line(&mut line).await?;
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SweepError;

    #[tokio::test]
    async fn test_invalid_network_aborts_before_probing() {
        let app = Application::new(AppConfig::default());
        let err = app.sweep("not-an-ip/40").await.unwrap_err();
        assert!(matches!(err, SweepError::InvalidNetwork { .. }));
        assert!(err.is_user_facing());
    }

    #[tokio::test]
    async fn test_run_swallows_invalid_network() {
        let app = Application::new(AppConfig::default());
        let cli = Cli {
            cidr: Some("300.1.2.3/24".to_string()),
            config_path: "config.toml".into(),
            verbose: 0,
            quiet: false,
        };
        // Prints the framed error block instead of failing the process
        assert!(app.run(cli).await.is_ok());
    }
}

//! cidrsweep - subnet liveness sweep
//!
//! Entry point: parses the CLI, loads configuration, initializes logging,
//! and runs one sweep.

use anyhow::Result;
use cidrsweep::{cli::Cli, config::AppConfig, core::Application, logging};
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(message) = cli.validate() {
        anyhow::bail!(message);
    }

    let mut config = AppConfig::load(&cli.config_path)?;
    if let Some(level) = cli.log_level_override() {
        config.logging.level = level.to_string();
    }
    logging::init_logging(&config.logging)?;

    debug!("configuration and logging ready");

    let app = Application::new(config);
    app.run(cli).await?;

    Ok(())
}

use anyhow::{Context, Result};

pub mod config;
pub mod dashboard;
pub mod runtime;

use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args()?;

    live_state::init_logging(config.log_mode).context("Failed to initialize logging")?;
    config.log_summary();

    runtime::run(config).await
}

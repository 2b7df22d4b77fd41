use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use live_state::LoggingMode;
use osc_listener::ListenerConfig;
use region_table::FetchConfig;
use tracing::info;

/// REAPER live dashboard
///
/// Listens for REAPER's OSC transport messages and redraws a status panel
/// with the current beat, time, tempo and region. Region colors come from
/// the REAPER web interface.
#[derive(Parser, Debug)]
#[command(name = "reaper-live")]
#[command(about = "Live REAPER transport dashboard")]
#[command(version)]
pub struct Args {
    /// Host running the REAPER web interface
    #[arg(long, env = "REAPER_LIVE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// REAPER web interface port
    #[arg(short, long, env = "REAPER_LIVE_PORT", default_value = "8080")]
    pub port: u16,

    /// Local address for incoming OSC messages
    #[arg(short, long, env = "REAPER_LIVE_LISTEN", default_value = "0.0.0.0:9000")]
    pub listen: SocketAddr,

    /// Re-fetch the region table every N seconds (fetched once if unset)
    #[arg(long, env = "REAPER_LIVE_REFRESH_INTERVAL")]
    pub refresh_interval: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "REAPER_LIVE_REQUEST_TIMEOUT", default_value = "10")]
    pub request_timeout: u64,

    /// Log output: silent, development or debug (logs go to stderr)
    #[arg(long, env = "REAPER_LIVE_LOG_MODE", default_value = "silent")]
    pub log_mode: LoggingMode,

    /// Fetch the region table, print it as JSON and exit
    #[arg(long)]
    pub dump_regions: bool,
}

impl Args {
    /// Validate command line arguments
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            bail!("Host must not be empty");
        }

        if self.port == 0 {
            bail!("Web interface port must not be 0");
        }

        if self.request_timeout == 0 {
            bail!("Request timeout must be positive");
        }

        if self.refresh_interval == Some(0) {
            bail!("Refresh interval must be positive");
        }

        Ok(())
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub listen: SocketAddr,
    pub refresh_interval: Option<Duration>,
    pub request_timeout: Duration,
    pub log_mode: LoggingMode,
    pub dump_regions: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            listen: args.listen,
            refresh_interval: args.refresh_interval.map(Duration::from_secs),
            request_timeout: Duration::from_secs(args.request_timeout),
            log_mode: args.log_mode,
            dump_regions: args.dump_regions,
        }
    }
}

impl Config {
    /// Parse and validate the process arguments
    pub fn from_args() -> Result<Self> {
        let args = Args::parse();
        args.validate()?;
        Ok(Config::from(args))
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            request_timeout: self.request_timeout,
            ..FetchConfig::new(self.host.clone(), self.port)
        }
    }

    pub fn listener_config(&self) -> ListenerConfig {
        ListenerConfig::new(self.listen)
    }

    /// Log configuration summary
    pub fn log_summary(&self) {
        info!("Configuration:");
        info!("  Web interface: {}:{}", self.host, self.port);
        info!("  OSC listen address: {}", self.listen);
        match self.refresh_interval {
            Some(interval) => info!("  Region refresh: every {}s", interval.as_secs()),
            None => info!("  Region refresh: once at startup"),
        }
        info!("  Request timeout: {}s", self.request_timeout.as_secs());
        info!("  Log mode: {}", self.log_mode);
    }
}

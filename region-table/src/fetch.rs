//! HTTP retrieval of the region table
//!
//! One GET per refresh, no retries. Callers decide what to do with a
//! failure; the event loop keeps whatever table it already had.

use std::time::Duration;

use url::Url;

use crate::error::{FetchError, FetchResult};
use crate::parser::{parse, RegionsData};

/// Path of the region dump on the REAPER web interface
pub const REGION_PATH: &str = "/_/REGION";

/// Configuration for [`RegionFetcher`]
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Host running the REAPER web interface
    /// Default: 127.0.0.1
    pub host: String,

    /// Web interface port
    /// Default: 8080
    pub port: u16,

    /// Timeout for establishing the TCP connection
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Timeout for the whole request, body included
    /// Default: 10 seconds
    pub request_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl FetchConfig {
    /// Create a config for the given host and port with default timeouts
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Build the region endpoint URL
    pub fn endpoint(&self) -> FetchResult<Url> {
        let base = Url::parse(&format!("http://{}:{}", self.host, self.port))
            .map_err(|e| FetchError::InvalidEndpoint(format!("{}:{}: {}", self.host, self.port, e)))?;

        base.join(REGION_PATH)
            .map_err(|e| FetchError::InvalidEndpoint(e.to_string()))
    }
}

/// Fetches and parses the region table
#[derive(Debug, Clone)]
pub struct RegionFetcher {
    client: reqwest::Client,
    endpoint: Url,
}

impl RegionFetcher {
    /// Create a fetcher for the configured endpoint
    pub fn new(config: &FetchConfig) -> FetchResult<Self> {
        let endpoint = config.endpoint()?;
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client, endpoint })
    }

    /// The URL requested on every refresh
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Issue one GET and parse the response body.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` when the request cannot be completed,
    /// `FetchError::Status` for a non-success response and
    /// `FetchError::Body` when the body cannot be read as text.
    pub async fn refresh(&self) -> FetchResult<RegionsData> {
        tracing::debug!("Requesting region table from {}", self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await.map_err(FetchError::Body)?;
        let regions = parse(&body);

        tracing::debug!(
            "Parsed {} named regions from {} bytes",
            regions.len(),
            body.len()
        );

        Ok(regions)
    }
}

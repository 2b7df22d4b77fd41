//! Error types for region table retrieval

use thiserror::Error;

/// Errors that can occur while fetching the region table
#[derive(Debug, Error)]
pub enum FetchError {
    /// Host or port do not form a valid endpoint URL
    #[error("Invalid region endpoint: {0}")]
    InvalidEndpoint(String),

    /// The HTTP client could not be constructed
    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, timeout or other transport failure
    #[error("Region request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The web interface answered with a non-success status
    #[error("Region request returned HTTP {0}")]
    Status(u16),

    /// The response body could not be read as text
    #[error("Failed to read region response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

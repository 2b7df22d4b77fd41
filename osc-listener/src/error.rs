//! Error types for the OSC listener

use std::net::SocketAddr;

use thiserror::Error;

/// Errors that can occur while starting the listener
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The UDP socket could not be bound
    #[error("Failed to bind OSC socket on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The bound address could not be read back
    #[error("Failed to read OSC socket address: {0}")]
    LocalAddr(#[source] std::io::Error),
}

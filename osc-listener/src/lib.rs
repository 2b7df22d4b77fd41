//! OSC transport listener for REAPER.
//!
//! This crate receives OSC datagrams over UDP and hands them on as
//! address-tagged [`InboundEvent`]s. It knows nothing about what the
//! addresses mean; routing them to state is the consumer's job.
//!
//! # Overview
//!
//! - [`OscListener`]: binds a UDP socket and forwards decoded messages to a
//!   channel until shut down.
//! - [`InboundEvent`]: address, typed arguments and receive time.
//! - [`OscValue`]: number, string or bool argument with fallible accessors.
//!
//! # Example
//!
//! ```no_run
//! use osc_listener::{InboundEvent, ListenerConfig, OscListener};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), osc_listener::ListenerError> {
//!     let (tx, mut rx) = mpsc::unbounded_channel::<InboundEvent>();
//!     let _listener = OscListener::bind(&ListenerConfig::default(), tx).await?;
//!
//!     while let Some(event) = rx.recv().await {
//!         if event.address == "/time" {
//!             println!("position: {:?}", event.number_arg(0));
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod event;
pub mod server;

pub use error::ListenerError;
pub use event::{DecodeError, InboundEvent, OscValue};
pub use server::{ListenerConfig, OscListener, DEFAULT_OSC_PORT};

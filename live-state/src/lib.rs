//! Live playback state for the REAPER dashboard
//!
//! This crate turns OSC transport events into display-ready values and
//! keeps the region table used to color the current region.
//!
//! # Overview
//!
//! - [`PlaybackStateStore`]: the five live fields, written one at a time
//! - [`RegionSnapshot`]: the installed region table, swapped whole on refresh
//! - [`EventRouter`]: applies [`InboundEvent`](osc_listener::InboundEvent)s to a [`LiveSession`]
//! - [`logging`]: tracing subscriber setup
//!
//! # Example
//!
//! ```rust
//! use live_state::{EventRouter, Field, LiveSession};
//! use osc_listener::InboundEvent;
//!
//! let session = LiveSession::new();
//! let router = EventRouter::new(session.clone());
//!
//! router.handle(&InboundEvent::new("/time", vec![12.3456.into()])).unwrap();
//! router.handle(&InboundEvent::new("/lastregion/name", vec!["Verse".into()])).unwrap();
//!
//! assert_eq!(session.playback.get(Field::TimePosition), "12.35");
//! assert_eq!(session.playback.get(Field::RegionColor), "Unknown");
//! ```

pub mod logging;
pub mod regions;
pub mod router;
pub mod session;
pub mod store;

pub use logging::{init_logging, LoggingError, LoggingMode};
pub use regions::{refresh_into, RegionSnapshot, UNKNOWN_COLOR};
pub use router::{EventRouter, Route};
pub use session::LiveSession;
pub use store::{Field, PlaybackState, PlaybackStateStore};

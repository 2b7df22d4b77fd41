//! Shared session state

use crate::regions::RegionSnapshot;
use crate::store::PlaybackStateStore;

/// Everything the router writes and the dashboard reads.
///
/// Both halves are reference counted; cloning a session hands out another
/// view of the same state.
#[derive(Debug, Clone, Default)]
pub struct LiveSession {
    /// Live transport values
    pub playback: PlaybackStateStore,
    /// Last successfully fetched region table
    pub regions: RegionSnapshot,
}

impl LiveSession {
    pub fn new() -> Self {
        Self::default()
    }
}

//! Playback state storage
//!
//! Holds the five live values shown on the dashboard. Every field is written
//! on its own: a reader can see a region name from one event next to the
//! color from the previous one until the second write lands. The display
//! only needs each field to be whole, never the pair to be consistent.

use std::sync::Arc;

use parking_lot::RwLock;

/// One tracked value of the live state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    BeatPosition,
    TimePosition,
    Tempo,
    RegionName,
    RegionColor,
}

impl Field {
    /// All fields in display order
    pub const ALL: [Field; 5] = [
        Field::BeatPosition,
        Field::TimePosition,
        Field::Tempo,
        Field::RegionName,
        Field::RegionColor,
    ];

    /// Stable identifier for logging
    pub fn key(self) -> &'static str {
        match self {
            Field::BeatPosition => "beat_position",
            Field::TimePosition => "time_position",
            Field::Tempo => "tempo",
            Field::RegionName => "region_name",
            Field::RegionColor => "region_color",
        }
    }
}

/// A full copy of the live values.
///
/// All values are display-ready strings: positions and tempo are already
/// fixed to two decimals and the color is hex or `"Unknown"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub beat_position: String,
    pub time_position: String,
    pub tempo: String,
    pub region_name: String,
    pub region_color: String,
}

impl PlaybackState {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::BeatPosition => &self.beat_position,
            Field::TimePosition => &self.time_position,
            Field::Tempo => &self.tempo,
            Field::RegionName => &self.region_name,
            Field::RegionColor => &self.region_color,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::BeatPosition => &mut self.beat_position,
            Field::TimePosition => &mut self.time_position,
            Field::Tempo => &mut self.tempo,
            Field::RegionName => &mut self.region_name,
            Field::RegionColor => &mut self.region_color,
        }
    }
}

/// Shared, field-addressable playback state.
///
/// Cloning the store shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct PlaybackStateStore {
    state: Arc<RwLock<PlaybackState>>,
}

impl PlaybackStateStore {
    /// Create a store with every field empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of one field
    pub fn get(&self, field: Field) -> String {
        self.state.read().get(field).to_string()
    }

    /// Replace one field, returning whether the value changed
    pub fn set(&self, field: Field, value: impl Into<String>) -> bool {
        let value = value.into();
        let mut state = self.state.write();
        let slot = state.slot_mut(field);

        if *slot == value {
            return false;
        }

        tracing::trace!("{} = {:?}", field.key(), value);
        *slot = value;
        true
    }

    /// Copy of all fields.
    ///
    /// Taken under one read lock, so no single field is torn.
    pub fn snapshot(&self) -> PlaybackState {
        self.state.read().clone()
    }
}

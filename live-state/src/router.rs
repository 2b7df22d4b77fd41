//! Address dispatch for inbound transport events

use osc_listener::{DecodeError, InboundEvent};

use crate::session::LiveSession;
use crate::store::Field;

/// The fixed set of addresses that update live state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// `/beat/str`, musical position as text
    BeatString,
    /// `/time`, seconds from project start
    Time,
    /// `/tempo/raw`, beats per minute
    TempoRaw,
    /// `/lastregion/name`, the region under the play cursor
    LastRegionName,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::BeatString,
        Route::Time,
        Route::TempoRaw,
        Route::LastRegionName,
    ];

    pub fn address(self) -> &'static str {
        match self {
            Route::BeatString => "/beat/str",
            Route::Time => "/time",
            Route::TempoRaw => "/tempo/raw",
            Route::LastRegionName => "/lastregion/name",
        }
    }

    /// Exact, case-sensitive match on the address
    pub fn from_address(address: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|route| route.address() == address)
    }
}

/// Applies inbound events to a [`LiveSession`]
#[derive(Debug, Clone)]
pub struct EventRouter {
    session: LiveSession,
}

impl EventRouter {
    pub fn new(session: LiveSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &LiveSession {
        &self.session
    }

    /// Apply one event.
    ///
    /// Returns the matched route, or `None` for addresses that are not
    /// tracked. Arguments are decoded before any field is written, so an
    /// error leaves state untouched.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if the first argument is missing or of the
    /// wrong kind for the route.
    pub fn handle(&self, event: &InboundEvent) -> Result<Option<Route>, DecodeError> {
        let Some(route) = Route::from_address(&event.address) else {
            tracing::trace!("Ignoring untracked address {}", event.address);
            return Ok(None);
        };

        let store = &self.session.playback;
        match route {
            Route::BeatString => {
                let beat = event.str_arg(0)?;
                store.set(Field::BeatPosition, beat);
            }
            Route::Time => {
                let seconds = event.number_arg(0)?;
                store.set(Field::TimePosition, fixed_2dp(seconds));
            }
            Route::TempoRaw => {
                let bpm = event.number_arg(0)?;
                store.set(Field::Tempo, fixed_2dp(bpm));
            }
            Route::LastRegionName => {
                let name = event.str_arg(0)?;
                if store.set(Field::RegionName, name) {
                    tracing::debug!("Entered region '{}'", name);
                }
                let color = self.session.regions.resolve_color(name);
                store.set(Field::RegionColor, color);
            }
        }

        Ok(Some(route))
    }
}

/// Two decimal places, exact ties rounded away from zero.
///
/// `{:.2}` already rounds the exact binary value correctly but sends exact
/// ties to the even digit. The only ties a double can hold are odd
/// multiples of 1/8 (`x.125`, `x.375`, ...), for which `value * 100` is exact.
fn fixed_2dp(value: f64) -> String {
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let hundredths = (value * 100.0).round();
        return format!("{:.2}", hundredths / 100.0);
    }
    format!("{value:.2}")
}

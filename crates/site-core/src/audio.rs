use crate::constants::*;

/// Browser events that count as a user gesture for autoplay.
pub const INTERACTION_EVENTS: [&str; 3] = ["mousedown", "keydown", "touchstart"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Track {
    Ambient,
    Transition,
    Home3d,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackSpec {
    pub path: &'static str,
    pub volume: f64,
    pub looping: bool,
    /// The transition clip keeps playing across the page change.
    pub pause_on_unmount: bool,
    pub auto_stop_ms: Option<f64>,
}

impl Track {
    pub fn spec(self) -> TrackSpec {
        match self {
            Track::Ambient => TrackSpec {
                path: AMBIENT_SOUND_PATH,
                volume: AMBIENT_VOLUME,
                looping: true,
                pause_on_unmount: true,
                auto_stop_ms: None,
            },
            Track::Transition => TrackSpec {
                path: TRANSITION_SOUND_PATH,
                volume: TRANSITION_VOLUME,
                looping: false,
                pause_on_unmount: false,
                auto_stop_ms: Some(TRANSITION_AUTO_STOP_MS),
            },
            Track::Home3d => TrackSpec {
                path: HOME3D_SOUND_PATH,
                volume: HOME3D_VOLUME,
                looping: false,
                pause_on_unmount: true,
                auto_stop_ms: None,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GateState {
    #[default]
    Idle,
    /// A `play()` promise is in flight.
    Pending,
    Started,
}

/// Interaction-gated playback for a looping background track.
///
/// Listeners stay attached until a play attempt succeeds; a rejected attempt
/// returns to `Idle` and waits for the next gesture.
#[derive(Clone, Debug, Default)]
pub struct AudioGate {
    state: GateState,
}

impl AudioGate {
    #[inline]
    pub fn state(&self) -> GateState {
        self.state
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.state == GateState::Started
    }

    #[inline]
    pub fn listeners_attached(&self) -> bool {
        self.state != GateState::Started
    }

    /// Returns true when the caller should call `play()` now.
    pub fn on_interaction(&mut self) -> bool {
        if self.state != GateState::Idle {
            return false;
        }
        self.state = GateState::Pending;
        true
    }

    /// Returns true when the listeners should be detached.
    pub fn on_play_result(&mut self, ok: bool) -> bool {
        if self.state != GateState::Pending {
            return false;
        }
        if ok {
            self.state = GateState::Started;
            true
        } else {
            self.state = GateState::Idle;
            false
        }
    }
}

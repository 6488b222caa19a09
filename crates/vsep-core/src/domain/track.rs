//! Track model: the raw sensor tuple and its validated form.

use serde::{Deserialize, Serialize};

/// Raw track tuple as supplied by a caller (live sensors, recorded logs,
/// enumerators).
///
/// Flags arrive integer-encoded and are only trusted after validation.
/// The short benchmark field names are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TrackInput {
    #[serde(alias = "cur_vertical_sep")]
    pub current_vertical_separation: i32,

    pub high_confidence: i32,

    #[serde(alias = "own_tracked_alt")]
    pub own_tracked_altitude: i32,

    #[serde(alias = "own_tracked_alt_rate")]
    pub own_tracked_altitude_rate: i32,

    #[serde(alias = "other_tracked_alt")]
    pub other_tracked_altitude: i32,

    pub up_separation: i32,

    pub down_separation: i32,

    pub climb_inhibit: i32,
}

/// A track tuple that passed the validator.
///
/// Only [`validate`](super::validate) builds one, so holding a `TrackState`
/// means every range-restricted field is inside the envelope it was checked
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TrackState {
    pub(crate) current_vertical_separation: i32,
    pub(crate) high_confidence: bool,
    pub(crate) own_tracked_altitude: i32,
    pub(crate) own_tracked_altitude_rate: i32,
    pub(crate) other_tracked_altitude: i32,
    pub(crate) up_separation: i32,
    pub(crate) down_separation: i32,
    pub(crate) climb_inhibit: bool,
}

impl TrackState {
    pub fn current_vertical_separation(&self) -> i32 {
        self.current_vertical_separation
    }

    pub fn high_confidence(&self) -> bool {
        self.high_confidence
    }

    pub fn own_tracked_altitude(&self) -> i32 {
        self.own_tracked_altitude
    }

    pub fn own_tracked_altitude_rate(&self) -> i32 {
        self.own_tracked_altitude_rate
    }

    pub fn other_tracked_altitude(&self) -> i32 {
        self.other_tracked_altitude
    }

    pub fn up_separation(&self) -> i32 {
        self.up_separation
    }

    pub fn down_separation(&self) -> i32 {
        self.down_separation
    }

    pub fn climb_inhibit(&self) -> bool {
        self.climb_inhibit
    }
}

impl From<TrackState> for TrackInput {
    fn from(state: TrackState) -> Self {
        Self {
            current_vertical_separation: state.current_vertical_separation,
            high_confidence: i32::from(state.high_confidence),
            own_tracked_altitude: state.own_tracked_altitude,
            own_tracked_altitude_rate: state.own_tracked_altitude_rate,
            other_tracked_altitude: state.other_tracked_altitude,
            up_separation: state.up_separation,
            down_separation: state.down_separation,
            climb_inhibit: i32::from(state.climb_inhibit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benchmark_field_names_are_accepted() {
        let json = r#"
        {
          "cur_vertical_sep": 601,
          "high_confidence": 1,
          "own_tracked_alt": 1000,
          "own_tracked_alt_rate": 600,
          "other_tracked_alt": 1000,
          "up_separation": 10,
          "down_separation": 5,
          "climb_inhibit": 0
        }"#;
        let input: TrackInput = serde_json::from_str(json).expect("deserialize");
        assert_eq!(input.current_vertical_separation, 601);
        assert_eq!(input.own_tracked_altitude_rate, 600);
        assert_eq!(input.other_tracked_altitude, 1000);
    }

    #[test]
    fn state_converts_back_to_zero_one_flags() {
        let state = TrackState {
            current_vertical_separation: 900,
            high_confidence: true,
            own_tracked_altitude: 1,
            own_tracked_altitude_rate: 2,
            other_tracked_altitude: 3,
            up_separation: 4,
            down_separation: 5,
            climb_inhibit: false,
        };
        let input = TrackInput::from(state);
        assert_eq!(input.high_confidence, 1);
        assert_eq!(input.climb_inhibit, 0);
        assert_eq!(input.down_separation, 5);
    }
}

//! Advisory model: the three possible engine outputs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The resolution advisory issued for one evaluation.
///
/// Serialized as SCREAMING_SNAKE_CASE (`UNRESOLVED` / `UPWARD` / `DOWNWARD`)
/// so recorded output stays readable next to the numeric codes used by the
/// benchmark harnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdvisoryState {
    /// No action required, or the need-signals conflict/cancel.
    #[default]
    Unresolved,
    /// Climb.
    #[serde(rename = "UPWARD")]
    UpwardAdvisory,
    /// Descend.
    #[serde(rename = "DOWNWARD")]
    DownwardAdvisory,
}

impl AdvisoryState {
    /// Numeric code: 0 = unresolved, 1 = upward, 2 = downward.
    pub fn code(self) -> u8 {
        match self {
            AdvisoryState::Unresolved => 0,
            AdvisoryState::UpwardAdvisory => 1,
            AdvisoryState::DownwardAdvisory => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(AdvisoryState::Unresolved),
            1 => Some(AdvisoryState::UpwardAdvisory),
            2 => Some(AdvisoryState::DownwardAdvisory),
            _ => None,
        }
    }

    pub fn is_resolved(self) -> bool {
        !matches!(self, AdvisoryState::Unresolved)
    }
}

impl fmt::Display for AdvisoryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdvisoryState::Unresolved => "unresolved",
            AdvisoryState::UpwardAdvisory => "upward",
            AdvisoryState::DownwardAdvisory => "downward",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advisory_serializes_as_short_names() {
        let s = serde_json::to_string(&AdvisoryState::Unresolved).unwrap();
        assert_eq!(s, "\"UNRESOLVED\"");

        let s = serde_json::to_string(&AdvisoryState::UpwardAdvisory).unwrap();
        assert_eq!(s, "\"UPWARD\"");

        let s = serde_json::to_string(&AdvisoryState::DownwardAdvisory).unwrap();
        assert_eq!(s, "\"DOWNWARD\"");
    }

    #[test]
    fn codes_match_benchmark_encoding() {
        assert_eq!(AdvisoryState::Unresolved.code(), 0);
        assert_eq!(AdvisoryState::UpwardAdvisory.code(), 1);
        assert_eq!(AdvisoryState::DownwardAdvisory.code(), 2);
        assert_eq!(AdvisoryState::from_code(3), None);
    }

    #[test]
    fn default_is_unresolved() {
        assert_eq!(AdvisoryState::default(), AdvisoryState::Unresolved);
        assert!(!AdvisoryState::default().is_resolved());
    }
}

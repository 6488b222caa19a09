//! Decision record: what the engine facade returns for one evaluation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AdvisoryState, Rejected, Resolution, TrackInput};

/// Serializable account of one evaluation.
///
/// Exactly one of `resolution` / `rejected` is present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub input: TrackInput,
    pub advisory: AdvisoryState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected: Option<Rejected>,

    pub decided_at: DateTime<Utc>,
}

impl DecisionRecord {
    pub fn accepted(input: TrackInput, resolution: Resolution, decided_at: DateTime<Utc>) -> Self {
        Self {
            input,
            advisory: resolution.advisory,
            resolution: Some(resolution),
            rejected: None,
            decided_at,
        }
    }

    pub fn rejected(input: TrackInput, reason: Rejected, decided_at: DateTime<Utc>) -> Self {
        Self {
            input,
            advisory: AdvisoryState::Unresolved,
            resolution: None,
            rejected: Some(reason),
            decided_at,
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.rejected.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rejected_record_is_unresolved_and_omits_resolution() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let r = DecisionRecord::rejected(
            TrackInput::default(),
            Rejected::ClimbRateOutOfRange {
                value: 700,
                min: 0,
                max: 600,
            },
            at,
        );
        assert!(r.is_rejected());
        assert_eq!(r.advisory, AdvisoryState::Unresolved);

        let v = serde_json::to_value(&r).unwrap();
        assert!(v.get("resolution").is_none());
        assert_eq!(v["advisory"], "UNRESOLVED");
        assert_eq!(v["rejected"]["kind"], "climb_rate_out_of_range");
    }
}

//! Events - things worth telling an operator about a decision.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AdvisoryState, Rejected, TrackInput};

/// AdvisoryEvent is emitted by the engine facade through an
/// [`EventSink`](crate::ports::EventSink).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AdvisoryEvent {
    /// Input refused by the validator; caller receives `Unresolved`.
    InputRejected {
        at: DateTime<Utc>,
        input: TrackInput,
        reason: Rejected,
    },

    /// An upward or downward advisory was issued.
    AdvisoryIssued {
        at: DateTime<Utc>,
        input: TrackInput,
        advisory: AdvisoryState,
    },

    /// An upward advisory was issued while climb inhibit was set.
    ClimbInhibitOverridden { at: DateTime<Utc>, input: TrackInput },
}

impl AdvisoryEvent {
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            AdvisoryEvent::InputRejected { at, .. }
            | AdvisoryEvent::AdvisoryIssued { at, .. }
            | AdvisoryEvent::ClimbInhibitOverridden { at, .. } => *at,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AdvisoryEvent::InputRejected { .. } => "input_rejected",
            AdvisoryEvent::AdvisoryIssued { .. } => "advisory_issued",
            AdvisoryEvent::ClimbInhibitOverridden { .. } => "climb_inhibit_overridden",
        }
    }
}

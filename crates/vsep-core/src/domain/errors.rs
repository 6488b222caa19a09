//! Errors - input rejection reasons.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a raw track tuple was refused by the validator.
///
/// A rejection is never surfaced as a crash: the engine maps it to
/// [`AdvisoryState::Unresolved`](super::AdvisoryState::Unresolved).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejected {
    #[error("vertical separation {value} outside [{min}, {max}]")]
    SeparationOutOfRange { value: i32, min: i32, max: i32 },

    #[error("own climb rate {value} outside [{min}, {max}]")]
    ClimbRateOutOfRange { value: i32, min: i32, max: i32 },

    #[error("flag {field}={value} is not 0/1 encoded")]
    InvalidFlag { field: String, value: i32 },
}

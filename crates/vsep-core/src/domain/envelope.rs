//! Operating envelope: the declared input domain and decision thresholds.
//!
//! Every field has a serde default so a config file only needs to name what
//! it changes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input domain plus the comparison thresholds used by the decision engine.
///
/// The defaults are the benchmark constants:
/// - separation in [0, 1500], own climb rate in [0, 600]
/// - engine active when `separation > 600` and `rate <= 600`
/// - climb inhibit considered when `separation > 700`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingEnvelope {
    /// Lowest accepted vertical separation (inclusive).
    pub separation_min: i32,
    /// Highest accepted vertical separation (inclusive).
    pub separation_max: i32,

    /// Lowest accepted own climb rate (inclusive).
    pub climb_rate_min: i32,
    /// Highest accepted own climb rate (inclusive).
    pub climb_rate_max: i32,

    /// Separation must be strictly greater than this for any advisory.
    pub activation_separation: i32,
    /// Own climb rate must be at most this for any advisory.
    pub activation_climb_rate: i32,

    /// Separation strictly above this arms the climb-inhibit override.
    pub inhibit_separation: i32,
}

impl Default for OperatingEnvelope {
    fn default() -> Self {
        Self {
            separation_min: 0,
            separation_max: 1500,
            climb_rate_min: 0,
            climb_rate_max: 600,
            activation_separation: 600,
            activation_climb_rate: 600,
            inhibit_separation: 700,
        }
    }
}

/// An envelope whose bounds contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    #[error("{field}: min {min} is greater than max {max}")]
    InvertedRange {
        field: &'static str,
        min: i32,
        max: i32,
    },

    #[error("{field}={value} lies outside [{min}, {max}]")]
    ThresholdOutsideRange {
        field: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
}

impl OperatingEnvelope {
    pub fn separation_in_range(&self, value: i32) -> bool {
        (self.separation_min..=self.separation_max).contains(&value)
    }

    pub fn climb_rate_in_range(&self, value: i32) -> bool {
        (self.climb_rate_min..=self.climb_rate_max).contains(&value)
    }

    /// Check that ranges are not inverted and thresholds sit inside them.
    pub fn check(&self) -> Result<(), EnvelopeError> {
        if self.separation_min > self.separation_max {
            return Err(EnvelopeError::InvertedRange {
                field: "separation",
                min: self.separation_min,
                max: self.separation_max,
            });
        }
        if self.climb_rate_min > self.climb_rate_max {
            return Err(EnvelopeError::InvertedRange {
                field: "climb_rate",
                min: self.climb_rate_min,
                max: self.climb_rate_max,
            });
        }

        let separation_thresholds = [
            ("activation_separation", self.activation_separation),
            ("inhibit_separation", self.inhibit_separation),
        ];
        for (field, value) in separation_thresholds {
            if !self.separation_in_range(value) {
                return Err(EnvelopeError::ThresholdOutsideRange {
                    field,
                    value,
                    min: self.separation_min,
                    max: self.separation_max,
                });
            }
        }

        if !self.climb_rate_in_range(self.activation_climb_rate) {
            return Err(EnvelopeError::ThresholdOutsideRange {
                field: "activation_climb_rate",
                value: self.activation_climb_rate,
                min: self.climb_rate_min,
                max: self.climb_rate_max,
            });
        }

        Ok(())
    }
}

//! Input validator: the gate between raw tuples and the decision engine.

use super::{OperatingEnvelope, Rejected, TrackInput, TrackState};

/// Check a raw tuple against the envelope and decode its flags.
///
/// Checks run in a fixed order (separation, climb rate, `high_confidence`,
/// `climb_inhibit`) and the first violation is returned.
pub fn validate(input: &TrackInput, envelope: &OperatingEnvelope) -> Result<TrackState, Rejected> {
    if !envelope.separation_in_range(input.current_vertical_separation) {
        return Err(Rejected::SeparationOutOfRange {
            value: input.current_vertical_separation,
            min: envelope.separation_min,
            max: envelope.separation_max,
        });
    }
    if !envelope.climb_rate_in_range(input.own_tracked_altitude_rate) {
        return Err(Rejected::ClimbRateOutOfRange {
            value: input.own_tracked_altitude_rate,
            min: envelope.climb_rate_min,
            max: envelope.climb_rate_max,
        });
    }
    let high_confidence = decode_flag("high_confidence", input.high_confidence)?;
    let climb_inhibit = decode_flag("climb_inhibit", input.climb_inhibit)?;

    Ok(TrackState {
        current_vertical_separation: input.current_vertical_separation,
        high_confidence,
        own_tracked_altitude: input.own_tracked_altitude,
        own_tracked_altitude_rate: input.own_tracked_altitude_rate,
        other_tracked_altitude: input.other_tracked_altitude,
        up_separation: input.up_separation,
        down_separation: input.down_separation,
        climb_inhibit,
    })
}

fn decode_flag(field: &str, value: i32) -> Result<bool, Rejected> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(Rejected::InvalidFlag {
            field: field.to_string(),
            value,
        }),
    }
}

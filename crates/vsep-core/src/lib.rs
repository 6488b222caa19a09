//! vsep-core
//!
//! Vertical-separation resolution-advisory engine: given two aircraft's
//! tracked altitudes, own climb rate, confidence and climb-inhibit flags,
//! decide whether to advise climbing, descending, or nothing.
//!
//! # Modules
//! - **domain**: track tuples, envelope, validator, decider, records, events
//! - **ports**: Clock and EventSink seams
//! - **app**: Engine facade and EngineBuilder
//! - **config**: JSON configuration
//! - **sweep**: boundary-grid and random evaluation with invariant checks
//!
//! The quickest way in is [`decide`], which uses the default envelope and
//! inhibit policy and never fails:
//!
//! ```
//! use vsep_core::{AdvisoryState, TrackInput, decide};
//!
//! let input = TrackInput {
//!     current_vertical_separation: 601,
//!     high_confidence: 1,
//!     own_tracked_altitude: 1000,
//!     own_tracked_altitude_rate: 600,
//!     other_tracked_altitude: 1000,
//!     up_separation: 10,
//!     down_separation: 5,
//!     climb_inhibit: 0,
//! };
//! assert_eq!(decide(&input), AdvisoryState::UpwardAdvisory);
//! ```

pub mod app;
pub mod config;
pub mod domain;
pub mod ports;
pub mod sweep;

pub use app::{AdvisoryTally, BuildError, Engine, EngineBuilder};
pub use config::{ConfigError, EngineConfig};
pub use domain::{
    AdvisoryState, Decider, DecisionRecord, DefaultDecider, InhibitPolicy, OperatingEnvelope,
    Rejected, Resolution, TrackInput, TrackState, validate,
};

/// Decide with the default envelope and inhibit policy.
///
/// Rejected input maps to [`AdvisoryState::Unresolved`]. No events are
/// emitted and nothing is logged.
pub fn decide(input: &TrackInput) -> AdvisoryState {
    let decider = DefaultDecider::default();
    match validate(input, decider.envelope()) {
        Ok(state) => decider.decide(&state),
        Err(_) => AdvisoryState::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn base() -> TrackInput {
        TrackInput {
            current_vertical_separation: 601,
            high_confidence: 1,
            own_tracked_altitude: 1000,
            own_tracked_altitude_rate: 600,
            other_tracked_altitude: 1000,
            up_separation: 10,
            down_separation: 5,
            climb_inhibit: 0,
        }
    }

    #[rstest]
    #[case::level_upward_preferred(base(), AdvisoryState::UpwardAdvisory)]
    #[case::own_below_other(TrackInput { own_tracked_altitude: 900, ..base() }, AdvisoryState::DownwardAdvisory)]
    #[case::separation_at_threshold(TrackInput { current_vertical_separation: 600, ..base() }, AdvisoryState::Unresolved)]
    #[case::climb_rate_out_of_range(TrackInput { own_tracked_altitude_rate: 700, ..base() }, AdvisoryState::Unresolved)]
    #[case::malformed_flag(TrackInput { high_confidence: 2, ..base() }, AdvisoryState::Unresolved)]
    #[case::inhibited_climb(TrackInput { current_vertical_separation: 701, climb_inhibit: 1, ..base() }, AdvisoryState::Unresolved)]
    fn decide_boundary_cases(#[case] input: TrackInput, #[case] expected: AdvisoryState) {
        assert_eq!(decide(&input), expected);
    }

    #[test]
    fn separation_at_threshold_is_unresolved_regardless_of_other_fields() {
        for own in [0, 900, 1000, 1100, 40_000] {
            for (up, down) in [(0, 0), (10, 5), (5, 10)] {
                for climb_inhibit in [0, 1] {
                    let input = TrackInput {
                        current_vertical_separation: 600,
                        own_tracked_altitude: own,
                        up_separation: up,
                        down_separation: down,
                        climb_inhibit,
                        ..base()
                    };
                    assert_eq!(decide(&input), AdvisoryState::Unresolved);
                }
            }
        }
    }

    #[test]
    fn decide_agrees_with_default_engine() {
        let engine = Engine::builder()
            .event_sink(std::sync::Arc::new(ports::NoopEventSink))
            .build()
            .unwrap();
        for input in sweep::SweepSpace::boundary(engine.envelope()).iter() {
            assert_eq!(decide(&input), engine.advise(&input), "{input:?}");
        }
    }
}

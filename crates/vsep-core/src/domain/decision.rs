//! Decision model: advisory determination from a validated track.
//!
//! This module defines the need-signal derivation, the conflict policy that
//! turns two signals into one advisory, and the climb-inhibit override.
//! Everything here is a pure function of the [`TrackState`] and the
//! configured thresholds; emitting events about the result is left to
//! [`Engine`](crate::app::Engine).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{AdvisoryState, OperatingEnvelope, TrackState};

/// What to do when an upward advisory meets an active climb inhibit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InhibitPolicy {
    /// Drop the upward advisory to `Unresolved`.
    #[default]
    Degrade,
    /// Keep the upward advisory and report the inhibition for operator review.
    IssueAndReport,
}

impl fmt::Display for InhibitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InhibitPolicy::Degrade => f.write_str("degrade"),
            InhibitPolicy::IssueAndReport => f.write_str("issue-and-report"),
        }
    }
}

impl FromStr for InhibitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "degrade" => Ok(InhibitPolicy::Degrade),
            "issue-and-report" | "issue_and_report" => Ok(InhibitPolicy::IssueAndReport),
            other => Err(format!(
                "unknown inhibit policy `{other}` (expected `degrade` or `issue-and-report`)"
            )),
        }
    }
}

/// Intermediate booleans of one decision, kept for explanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NeedSignals {
    pub upward_preferred: bool,
    pub active: bool,
    pub need_upward: bool,
    pub need_downward: bool,
}

/// How the climb-inhibit override changed (or did not change) the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InhibitOverride {
    /// Upward advisory dropped to `Unresolved`.
    Degraded,
    /// Upward advisory issued despite the inhibit; needs operator review.
    IssuedDespiteInhibit,
}

/// Full result of resolving one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub signals: NeedSignals,

    /// Advisory before the inhibit override.
    pub candidate: AdvisoryState,

    /// Advisory returned to the caller.
    pub advisory: AdvisoryState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inhibit_override: Option<InhibitOverride>,
}

/// Trait for deciding the advisory for a validated track.
///
/// Deciders are pure: same track in, same resolution out, no side effects.
pub trait Decider: Send + Sync {
    /// Resolve a track, keeping every intermediate signal.
    fn resolve(&self, state: &TrackState) -> Resolution;

    /// Resolve a track and return only the advisory.
    fn decide(&self, state: &TrackState) -> AdvisoryState {
        self.resolve(state).advisory
    }
}

/// The vertical-separation decider.
#[derive(Debug, Clone, Default)]
pub struct DefaultDecider {
    envelope: OperatingEnvelope,
    inhibit_policy: InhibitPolicy,
}

impl DefaultDecider {
    pub fn new(envelope: OperatingEnvelope, inhibit_policy: InhibitPolicy) -> Self {
        Self {
            envelope,
            inhibit_policy,
        }
    }

    pub fn envelope(&self) -> &OperatingEnvelope {
        &self.envelope
    }

    pub fn inhibit_policy(&self) -> InhibitPolicy {
        self.inhibit_policy
    }

    /// Derive preference, gate and the two need-signals.
    ///
    /// `need_upward` and `need_downward` are computed independently from the
    /// same altitude comparison. Callers must not assume they are exclusive.
    pub fn signals(&self, state: &TrackState) -> NeedSignals {
        // Ties favor "not upward preferred".
        let upward_preferred = state.up_separation > state.down_separation;

        let active = state.high_confidence
            && state.own_tracked_altitude_rate <= self.envelope.activation_climb_rate
            && state.current_vertical_separation > self.envelope.activation_separation;

        if !active {
            return NeedSignals {
                upward_preferred,
                active,
                need_upward: false,
                need_downward: false,
            };
        }

        let own = state.own_tracked_altitude;
        let other = state.other_tracked_altitude;

        let need_upward = (upward_preferred && own >= other) || (!upward_preferred && other < own);
        let need_downward = (upward_preferred && own < other) || (!upward_preferred && other >= own);

        NeedSignals {
            upward_preferred,
            active,
            need_upward,
            need_downward,
        }
    }

    fn inhibit_armed(&self, state: &TrackState) -> bool {
        state.climb_inhibit
            && state.high_confidence
            && state.current_vertical_separation > self.envelope.inhibit_separation
    }
}

/// Both-true and both-false are ambiguous and resolve to `Unresolved`.
pub fn combine_signals(need_upward: bool, need_downward: bool) -> AdvisoryState {
    match (need_upward, need_downward) {
        (true, false) => AdvisoryState::UpwardAdvisory,
        (false, true) => AdvisoryState::DownwardAdvisory,
        _ => AdvisoryState::Unresolved,
    }
}

impl Decider for DefaultDecider {
    fn resolve(&self, state: &TrackState) -> Resolution {
        let signals = self.signals(state);
        let candidate = combine_signals(signals.need_upward, signals.need_downward);

        let (advisory, inhibit_override) =
            if candidate == AdvisoryState::UpwardAdvisory && self.inhibit_armed(state) {
                match self.inhibit_policy {
                    InhibitPolicy::Degrade => {
                        (AdvisoryState::Unresolved, Some(InhibitOverride::Degraded))
                    }
                    InhibitPolicy::IssueAndReport => (
                        AdvisoryState::UpwardAdvisory,
                        Some(InhibitOverride::IssuedDespiteInhibit),
                    ),
                }
            } else {
                (candidate, None)
            };

        Resolution {
            signals,
            candidate,
            advisory,
            inhibit_override,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TrackInput, validate};
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

    fn state(input: TrackInput) -> TrackState {
        validate(&input, &OperatingEnvelope::default()).expect("valid input")
    }

    fn decider(policy: InhibitPolicy) -> DefaultDecider {
        DefaultDecider::new(OperatingEnvelope::default(), policy)
    }

    #[test]
    fn upward_preferred_and_level_gives_upward() {
        let r = decider(InhibitPolicy::Degrade).resolve(&state(base()));
        assert!(r.signals.active);
        assert!(r.signals.upward_preferred);
        assert!(r.signals.need_upward);
        assert!(!r.signals.need_downward);
        assert_eq!(r.advisory, AdvisoryState::UpwardAdvisory);
        assert_eq!(r.inhibit_override, None);
    }

    #[test]
    fn own_below_other_gives_downward() {
        let input = TrackInput {
            own_tracked_altitude: 900,
            ..base()
        };
        let r = decider(InhibitPolicy::Degrade).resolve(&state(input));
        assert!(!r.signals.need_upward);
        assert!(r.signals.need_downward);
        assert_eq!(r.advisory, AdvisoryState::DownwardAdvisory);
    }

    #[test]
    fn separation_tie_is_not_upward_preferred() {
        let input = TrackInput {
            up_separation: 5,
            down_separation: 5,
            ..base()
        };
        let r = decider(InhibitPolicy::Degrade).resolve(&state(input));
        assert!(!r.signals.upward_preferred);
        // other >= own with equal altitudes
        assert_eq!(r.advisory, AdvisoryState::DownwardAdvisory);
    }

    #[test]
    fn not_upward_preferred_and_own_above_gives_upward() {
        let input = TrackInput {
            up_separation: 1,
            down_separation: 5,
            own_tracked_altitude: 1100,
            ..base()
        };
        let r = decider(InhibitPolicy::Degrade).resolve(&state(input));
        assert_eq!(r.advisory, AdvisoryState::UpwardAdvisory);
    }

    #[rstest]
    #[case::separation_at_threshold(TrackInput { current_vertical_separation: 600, ..base() })]
    #[case::separation_zero(TrackInput { current_vertical_separation: 0, ..base() })]
    #[case::low_confidence(TrackInput { high_confidence: 0, ..base() })]
    #[case::low_confidence_downward(TrackInput { high_confidence: 0, own_tracked_altitude: 900, ..base() })]
    fn gate_closed_gives_unresolved(#[case] input: TrackInput) {
        let r = decider(InhibitPolicy::IssueAndReport).resolve(&state(input));
        assert!(!r.signals.active);
        assert!(!r.signals.need_upward);
        assert!(!r.signals.need_downward);
        assert_eq!(r.advisory, AdvisoryState::Unresolved);
    }

    #[test]
    fn climb_rate_above_activation_limit_closes_gate() {
        // Wider accepted range, default activation limit.
        let envelope = OperatingEnvelope {
            climb_rate_max: 1000,
            ..OperatingEnvelope::default()
        };
        let input = TrackInput {
            own_tracked_altitude_rate: 601,
            ..base()
        };
        let s = validate(&input, &envelope).expect("valid input");
        let r = DefaultDecider::new(envelope, InhibitPolicy::Degrade).resolve(&s);
        assert!(!r.signals.active);
        assert_eq!(r.advisory, AdvisoryState::Unresolved);
    }

    #[rstest]
    #[case::both_true(true, true, AdvisoryState::Unresolved)]
    #[case::both_false(false, false, AdvisoryState::Unresolved)]
    #[case::up_only(true, false, AdvisoryState::UpwardAdvisory)]
    #[case::down_only(false, true, AdvisoryState::DownwardAdvisory)]
    fn conflicting_signals_resolve_to_unresolved(
        #[case] up: bool,
        #[case] down: bool,
        #[case] expected: AdvisoryState,
    ) {
        assert_eq!(combine_signals(up, down), expected);
    }

    #[test]
    fn inhibited_climb_degrades_by_default() {
        let input = TrackInput {
            current_vertical_separation: 701,
            climb_inhibit: 1,
            ..base()
        };
        let r = decider(InhibitPolicy::Degrade).resolve(&state(input));
        assert_eq!(r.candidate, AdvisoryState::UpwardAdvisory);
        assert_eq!(r.advisory, AdvisoryState::Unresolved);
        assert_eq!(r.inhibit_override, Some(InhibitOverride::Degraded));
    }

    #[test]
    fn inhibited_climb_is_issued_and_flagged_under_report_policy() {
        let input = TrackInput {
            current_vertical_separation: 701,
            climb_inhibit: 1,
            ..base()
        };
        let r = decider(InhibitPolicy::IssueAndReport).resolve(&state(input));
        assert_eq!(r.advisory, AdvisoryState::UpwardAdvisory);
        assert_eq!(
            r.inhibit_override,
            Some(InhibitOverride::IssuedDespiteInhibit)
        );
    }

    #[test]
    fn inhibit_is_not_armed_at_threshold() {
        let input = TrackInput {
            current_vertical_separation: 700,
            climb_inhibit: 1,
            ..base()
        };
        let r = decider(InhibitPolicy::Degrade).resolve(&state(input));
        assert_eq!(r.advisory, AdvisoryState::UpwardAdvisory);
        assert_eq!(r.inhibit_override, None);
    }

    #[test]
    fn inhibit_leaves_downward_alone() {
        let input = TrackInput {
            current_vertical_separation: 1200,
            climb_inhibit: 1,
            own_tracked_altitude: 900,
            ..base()
        };
        let r = decider(InhibitPolicy::Degrade).resolve(&state(input));
        assert_eq!(r.advisory, AdvisoryState::DownwardAdvisory);
        assert_eq!(r.inhibit_override, None);
    }

    #[test]
    fn decide_is_deterministic() {
        let d = decider(InhibitPolicy::Degrade);
        let s = state(TrackInput {
            own_tracked_altitude: 950,
            ..base()
        });
        assert_eq!(d.decide(&s), d.decide(&s));
    }

    #[test]
    fn policy_parses_cli_and_config_spellings() {
        assert_eq!("degrade".parse(), Ok(InhibitPolicy::Degrade));
        assert_eq!("issue-and-report".parse(), Ok(InhibitPolicy::IssueAndReport));
        assert_eq!("issue_and_report".parse(), Ok(InhibitPolicy::IssueAndReport));
        assert!("abort".parse::<InhibitPolicy>().is_err());
    }
}

#[cfg(kani)]
mod proofs {
    use super::*;
    use crate::domain::{TrackInput, validate};

    fn any_state() -> TrackState {
        let input = TrackInput {
            current_vertical_separation: kani::any(),
            high_confidence: kani::any(),
            own_tracked_altitude: kani::any(),
            own_tracked_altitude_rate: kani::any(),
            other_tracked_altitude: kani::any(),
            up_separation: kani::any(),
            down_separation: kani::any(),
            climb_inhibit: kani::any(),
        };
        let validated = validate(&input, &OperatingEnvelope::default());
        kani::assume(validated.is_ok());
        validated.unwrap()
    }

    #[kani::proof]
    fn closed_gate_never_advises() {
        let s = any_state();
        let policy = if kani::any() {
            InhibitPolicy::Degrade
        } else {
            InhibitPolicy::IssueAndReport
        };
        let d = DefaultDecider::new(OperatingEnvelope::default(), policy);
        kani::assume(!s.high_confidence || s.current_vertical_separation <= 600);
        assert_eq!(d.decide(&s), AdvisoryState::Unresolved);
    }

    #[kani::proof]
    fn advisory_matches_exactly_one_signal() {
        let s = any_state();
        let r = DefaultDecider::default().resolve(&s);
        match r.candidate {
            AdvisoryState::UpwardAdvisory => {
                assert!(r.signals.need_upward && !r.signals.need_downward)
            }
            AdvisoryState::DownwardAdvisory => {
                assert!(!r.signals.need_upward && r.signals.need_downward)
            }
            AdvisoryState::Unresolved => assert!(r.signals.need_upward == r.signals.need_downward),
        }
    }

    #[kani::proof]
    fn degrade_never_issues_inhibited_climb() {
        let s = any_state();
        let advisory = DefaultDecider::default().decide(&s);
        assert!(
            !(advisory == AdvisoryState::UpwardAdvisory
                && s.climb_inhibit
                && s.high_confidence
                && s.current_vertical_separation > 700)
        );
    }
}

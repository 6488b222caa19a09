//! Envelope sweep: evaluate the engine over many inputs and check its
//! invariants on every evaluation.
//!
//! Two input sources:
//! - [`SweepSpace`]: cartesian product of per-field value lists, by default
//!   the boundary values of the envelope (plus values just outside it and
//!   malformed flag encodings)
//! - [`sample`]: seeded random tuples drawn slightly beyond the envelope
//!
//! [`run`] never panics on a broken invariant; it collects [`Violation`]s.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::app::{AdvisoryTally, Engine};
use crate::domain::{
    AdvisoryState, DecisionRecord, EnvelopeError, InhibitOverride, InhibitPolicy,
    OperatingEnvelope, TrackInput,
};

/// Per-field value lists whose cartesian product is swept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepSpace {
    pub separations: Vec<i32>,
    pub high_confidence: Vec<i32>,
    pub own_altitudes: Vec<i32>,
    pub climb_rates: Vec<i32>,
    pub other_altitudes: Vec<i32>,
    pub up_separations: Vec<i32>,
    pub down_separations: Vec<i32>,
    pub climb_inhibit: Vec<i32>,
}

impl SweepSpace {
    /// Boundary values of `envelope` on both sides of every comparison.
    pub fn boundary(envelope: &OperatingEnvelope) -> Self {
        let separations = around(&[
            envelope.separation_min,
            envelope.activation_separation,
            envelope.inhibit_separation,
            envelope.separation_max,
        ]);
        let climb_rates = around(&[
            envelope.climb_rate_min,
            envelope.activation_climb_rate,
            envelope.climb_rate_max,
        ]);

        Self {
            separations,
            high_confidence: vec![0, 1, 2],
            own_altitudes: vec![900, 1000, 1100],
            climb_rates,
            other_altitudes: vec![1000],
            up_separations: vec![5, 10],
            down_separations: vec![5, 10],
            climb_inhibit: vec![0, 1, 2],
        }
    }

    fn dims(&self) -> [&[i32]; 8] {
        [
            &self.separations,
            &self.high_confidence,
            &self.own_altitudes,
            &self.climb_rates,
            &self.other_altitudes,
            &self.up_separations,
            &self.down_separations,
            &self.climb_inhibit,
        ]
    }

    /// Number of tuples in the product.
    pub fn len(&self) -> usize {
        self.dims().iter().map(|d| d.len()).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> SweepIter<'_> {
        SweepIter {
            space: self,
            next: 0,
            total: self.len(),
        }
    }
}

/// Values `v - 1`, `v`, `v + 1` for every `v`, sorted and deduplicated.
fn around(values: &[i32]) -> Vec<i32> {
    let mut out: Vec<i32> = values
        .iter()
        .flat_map(|&v| [v.saturating_sub(1), v, v.saturating_add(1)])
        .collect();
    out.sort_unstable();
    out.dedup();
    out
}

/// Iterator over a [`SweepSpace`], last field varying fastest.
pub struct SweepIter<'a> {
    space: &'a SweepSpace,
    next: usize,
    total: usize,
}

impl Iterator for SweepIter<'_> {
    type Item = TrackInput;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total {
            return None;
        }
        let dims = self.space.dims();
        let mut rest = self.next;
        let mut picked = [0i32; 8];
        for (slot, dim) in picked.iter_mut().zip(dims.iter()).rev() {
            *slot = dim[rest % dim.len()];
            rest /= dim.len();
        }
        self.next += 1;

        let [sep, hc, own, rate, other, up, down, ci] = picked;
        Some(TrackInput {
            current_vertical_separation: sep,
            high_confidence: hc,
            own_tracked_altitude: own,
            own_tracked_altitude_rate: rate,
            other_tracked_altitude: other,
            up_separation: up,
            down_separation: down,
            climb_inhibit: ci,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.next;
        (left, Some(left))
    }
}

impl ExactSizeIterator for SweepIter<'_> {}

/// Margin drawn beyond each envelope range so rejections get exercised.
const SAMPLE_MARGIN: i32 = 50;

/// `count` random tuples, reproducible for a given `seed`.
///
/// Fails on an inconsistent envelope, whose ranges cannot be drawn from.
pub fn sample(
    seed: u64,
    count: usize,
    envelope: &OperatingEnvelope,
) -> Result<Vec<TrackInput>, EnvelopeError> {
    envelope.check()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let inputs = (0..count)
        .map(|_| TrackInput {
            current_vertical_separation: rng.gen_range(
                envelope.separation_min.saturating_sub(SAMPLE_MARGIN)
                    ..=envelope.separation_max.saturating_add(SAMPLE_MARGIN),
            ),
            high_confidence: sample_flag(&mut rng),
            own_tracked_altitude: rng.gen_range(0..=40_000),
            own_tracked_altitude_rate: rng.gen_range(
                envelope.climb_rate_min.saturating_sub(SAMPLE_MARGIN)
                    ..=envelope.climb_rate_max.saturating_add(SAMPLE_MARGIN),
            ),
            other_tracked_altitude: rng.gen_range(0..=40_000),
            up_separation: rng.gen_range(0..=1000),
            down_separation: rng.gen_range(0..=1000),
            climb_inhibit: sample_flag(&mut rng),
        })
        .collect();
    Ok(inputs)
}

/// Mostly 0/1, occasionally a malformed encoding.
fn sample_flag(rng: &mut StdRng) -> i32 {
    if rng.gen_bool(0.05) {
        rng.gen_range(2..=3)
    } else {
        rng.gen_range(0..=1)
    }
}

/// A broken invariant observed during a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub property: String,
    pub input: TrackInput,
    pub advisory: AdvisoryState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub tally: AdvisoryTally,
    pub violations: Vec<Violation>,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Evaluate every input and check the engine's invariants.
pub fn run(engine: &Engine, inputs: impl IntoIterator<Item = TrackInput>) -> SweepReport {
    let mut report = SweepReport::default();
    for input in inputs {
        let record = engine.evaluate(&input);
        let again = engine.evaluate(&input);

        report.tally.record(&record);
        for property in check(engine, &record, &again) {
            report.violations.push(Violation {
                property: property.to_string(),
                input,
                advisory: record.advisory,
            });
        }
    }
    tracing::info!(
        evaluated = report.tally.evaluated,
        violations = report.violations.len(),
        "sweep finished"
    );
    report
}

/// Names of the invariants `record` breaks.
fn check(engine: &Engine, record: &DecisionRecord, again: &DecisionRecord) -> Vec<&'static str> {
    let envelope = engine.envelope();
    let input = &record.input;
    let mut broken = Vec::new();

    if record.advisory != again.advisory
        || record.resolution != again.resolution
        || record.rejected != again.rejected
    {
        broken.push("determinism");
    }

    let binary = |v: i32| v == 0 || v == 1;
    let should_reject = !envelope.separation_in_range(input.current_vertical_separation)
        || !envelope.climb_rate_in_range(input.own_tracked_altitude_rate)
        || !binary(input.high_confidence)
        || !binary(input.climb_inhibit);
    if should_reject != record.is_rejected() {
        broken.push("validator_domain");
    }

    let Some(resolution) = record.resolution else {
        if record.advisory != AdvisoryState::Unresolved {
            broken.push("rejected_is_unresolved");
        }
        return broken;
    };

    let gate_closed = input.high_confidence != 1
        || input.own_tracked_altitude_rate > envelope.activation_climb_rate
        || input.current_vertical_separation <= envelope.activation_separation;
    if gate_closed && record.advisory != AdvisoryState::Unresolved {
        broken.push("gating");
    }

    let signals = resolution.signals;
    let expected_candidate = match (signals.need_upward, signals.need_downward) {
        (true, false) => AdvisoryState::UpwardAdvisory,
        (false, true) => AdvisoryState::DownwardAdvisory,
        _ => AdvisoryState::Unresolved,
    };
    if resolution.candidate != expected_candidate {
        broken.push("conflict_default");
    }

    let inhibit_armed = resolution.candidate == AdvisoryState::UpwardAdvisory
        && input.climb_inhibit == 1
        && input.high_confidence == 1
        && input.current_vertical_separation > envelope.inhibit_separation;
    let expected = match (inhibit_armed, engine.inhibit_policy()) {
        (false, _) => (resolution.candidate, None),
        (true, InhibitPolicy::Degrade) => {
            (AdvisoryState::Unresolved, Some(InhibitOverride::Degraded))
        }
        (true, InhibitPolicy::IssueAndReport) => (
            AdvisoryState::UpwardAdvisory,
            Some(InhibitOverride::IssuedDespiteInhibit),
        ),
    };
    if (record.advisory, resolution.inhibit_override) != expected {
        broken.push("inhibit_policy");
    }

    broken
}

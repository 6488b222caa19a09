//! Engine - validator + decider + side channels.
//!
//! evaluate: validate → resolve → emit events → DecisionRecord

use std::sync::Arc;

use crate::app::{BuildError, EngineBuilder};
use crate::config::EngineConfig;
use crate::domain::{
    AdvisoryEvent, AdvisoryState, Decider, DecisionRecord, InhibitOverride, InhibitPolicy,
    OperatingEnvelope, TrackInput, validate,
};
use crate::ports::{Clock, EventSink};

/// The engine facade.
///
/// Holds no per-call state: `evaluate` takes `&self` and the engine can be
/// shared across threads.
pub struct Engine {
    pub(crate) envelope: OperatingEnvelope,
    pub(crate) decider: Box<dyn Decider>,
    pub(crate) inhibit_policy: InhibitPolicy,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) event_sink: Arc<dyn EventSink>,
}

impl Engine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn from_config(config: &EngineConfig) -> Result<Self, BuildError> {
        EngineBuilder::from_config(config).build()
    }

    pub fn envelope(&self) -> &OperatingEnvelope {
        &self.envelope
    }

    pub fn inhibit_policy(&self) -> InhibitPolicy {
        self.inhibit_policy
    }

    /// Evaluate one raw tuple.
    ///
    /// Rejected input yields an `Unresolved` record carrying the reason.
    pub fn evaluate(&self, input: &TrackInput) -> DecisionRecord {
        let at = self.clock.now();

        let state = match validate(input, &self.envelope) {
            Ok(state) => state,
            Err(reason) => {
                tracing::debug!(%reason, "track rejected");
                self.event_sink.emit(AdvisoryEvent::InputRejected {
                    at,
                    input: *input,
                    reason: reason.clone(),
                });
                return DecisionRecord::rejected(*input, reason, at);
            }
        };

        let resolution = self.decider.resolve(&state);
        tracing::debug!(
            upward_preferred = resolution.signals.upward_preferred,
            active = resolution.signals.active,
            need_upward = resolution.signals.need_upward,
            need_downward = resolution.signals.need_downward,
            advisory = %resolution.advisory,
            "track resolved"
        );

        match resolution.inhibit_override {
            Some(InhibitOverride::Degraded) => {
                tracing::info!(
                    separation = state.current_vertical_separation(),
                    "upward advisory withheld: climb inhibit set"
                );
            }
            Some(InhibitOverride::IssuedDespiteInhibit) => {
                tracing::warn!(
                    separation = state.current_vertical_separation(),
                    "upward advisory issued with climb inhibit set; operator review required"
                );
                self.event_sink
                    .emit(AdvisoryEvent::ClimbInhibitOverridden { at, input: *input });
            }
            None => {}
        }

        if resolution.advisory.is_resolved() {
            self.event_sink.emit(AdvisoryEvent::AdvisoryIssued {
                at,
                input: *input,
                advisory: resolution.advisory,
            });
        }

        DecisionRecord::accepted(*input, resolution, at)
    }

    /// Evaluate one raw tuple and return only the advisory.
    pub fn advise(&self, input: &TrackInput) -> AdvisoryState {
        self.evaluate(input).advisory
    }
}

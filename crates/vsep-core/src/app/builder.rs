//! EngineBuilder - wiring and fail-fast checks for the engine facade.

use std::sync::Arc;

use crate::app::Engine;
use crate::config::EngineConfig;
use crate::domain::{DefaultDecider, EnvelopeError, InhibitPolicy, OperatingEnvelope};
use crate::ports::{Clock, EventSink, SystemClock, TracingEventSink};

/// EngineBuilder assembles an [`Engine`].
///
/// ```ignore
/// let engine = EngineBuilder::new()
///     .inhibit_policy(InhibitPolicy::IssueAndReport)
///     .event_sink(Arc::new(MemoryEventSink::new()))
///     .build()?;
/// ```
///
/// `build()` checks the envelope and refuses to produce an engine whose
/// thresholds contradict its accepted ranges.
pub struct EngineBuilder {
    envelope: OperatingEnvelope,
    inhibit_policy: InhibitPolicy,
    clock: Arc<dyn Clock>,
    event_sink: Arc<dyn EventSink>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("inconsistent operating envelope: {0}")]
    Envelope(#[from] EnvelopeError),
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            envelope: OperatingEnvelope::default(),
            inhibit_policy: InhibitPolicy::default(),
            clock: Arc::new(SystemClock),
            event_sink: Arc::new(TracingEventSink),
        }
    }

    /// Start from a loaded config; clock and sink stay at their defaults.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new()
            .envelope(config.envelope)
            .inhibit_policy(config.inhibit_policy)
    }

    pub fn envelope(mut self, envelope: OperatingEnvelope) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn inhibit_policy(mut self, policy: InhibitPolicy) -> Self {
        self.inhibit_policy = policy;
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.event_sink = sink;
        self
    }

    pub fn build(self) -> Result<Engine, BuildError> {
        self.envelope.check()?;
        Ok(Engine {
            envelope: self.envelope,
            decider: Box::new(DefaultDecider::new(self.envelope, self.inhibit_policy)),
            inhibit_policy: self.inhibit_policy,
            clock: self.clock,
            event_sink: self.event_sink,
        })
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

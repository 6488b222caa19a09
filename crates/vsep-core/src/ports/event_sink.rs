//! EventSink port - where advisory events go.
//!
//! - TracingEventSink: structured log lines (default)
//! - MemoryEventSink: keeps events for inspection in tests and sweeps
//! - NoopEventSink: drops everything

use std::sync::{Mutex, PoisonError};

use crate::domain::AdvisoryEvent;

/// EventSink records domain events.
///
/// Emitting must not fail the decision: sinks swallow their own errors.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AdvisoryEvent);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn emit(&self, _event: AdvisoryEvent) {}
}

/// Writes each event through `tracing`.
///
/// Everything goes out at `debug`; the engine raises the operator-facing
/// warning for inhibit overrides itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: AdvisoryEvent) {
        match &event {
            AdvisoryEvent::ClimbInhibitOverridden { at, input } => {
                tracing::debug!(
                    event = event.name(),
                    at = %at,
                    separation = input.current_vertical_separation,
                    "climb inhibit overridden"
                );
            }
            AdvisoryEvent::InputRejected { at, reason, .. } => {
                tracing::debug!(event = event.name(), at = %at, %reason, "input rejected");
            }
            AdvisoryEvent::AdvisoryIssued { at, advisory, .. } => {
                tracing::debug!(event = event.name(), at = %at, %advisory, "advisory issued");
            }
        }
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<AdvisoryEvent>>,
}

impl MemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AdvisoryEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemoryEventSink {
    fn emit(&self, event: AdvisoryEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TrackInput;
    use chrono::{TimeZone, Utc};

    #[test]
    fn memory_sink_keeps_events_in_order() {
        let sink = MemoryEventSink::new();
        assert!(sink.is_empty());

        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        sink.emit(AdvisoryEvent::ClimbInhibitOverridden {
            at,
            input: TrackInput::default(),
        });
        sink.emit(AdvisoryEvent::AdvisoryIssued {
            at,
            input: TrackInput::default(),
            advisory: crate::domain::AdvisoryState::UpwardAdvisory,
        });

        let names: Vec<_> = sink.events().iter().map(AdvisoryEvent::name).collect();
        assert_eq!(names, vec!["climb_inhibit_overridden", "advisory_issued"]);
        assert!(sink.events().iter().all(|e| e.at() == at));
    }
}

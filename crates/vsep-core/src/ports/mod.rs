//! Ports - seams to the outside world.
//!
//! The decision itself is pure; these traits carry the two side channels the
//! engine facade needs: a time source and somewhere to report events.

pub mod clock;
pub mod event_sink;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::{EventSink, MemoryEventSink, NoopEventSink, TracingEventSink};

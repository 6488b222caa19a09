//! Domain model (track tuples, envelope, advisories, decisions, events).

pub mod advisory;
pub mod decision;
pub mod envelope;
pub mod errors;
pub mod events;
pub mod record;
pub mod track;
pub mod validation;

pub use advisory::AdvisoryState;
pub use decision::{
    Decider, DefaultDecider, InhibitOverride, InhibitPolicy, NeedSignals, Resolution,
    combine_signals,
};
pub use envelope::{EnvelopeError, OperatingEnvelope};
pub use errors::Rejected;
pub use events::AdvisoryEvent;
pub use record::DecisionRecord;
pub use track::{TrackInput, TrackState};
pub use validation::validate;

//! App - the engine facade and its wiring.
//!
//! # Components
//! - **EngineBuilder**: wiring and fail-fast envelope checks
//! - **Engine**: validate → decide → report, one call at a time
//! - **AdvisoryTally**: outcome counts over many evaluations

pub mod builder;
pub mod engine;
pub mod status;

pub use self::builder::{BuildError, EngineBuilder};
pub use self::engine::Engine;
pub use self::status::AdvisoryTally;

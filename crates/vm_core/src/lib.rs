//! vm_core — shared newtypes and the external collaborators the rest of the
//! workspace is parameterized over: a clock, a UUID source, and a
//! non-deterministic RNG used only for uniform ballot sampling.
//!
//! This crate carries no election semantics; see `vm_algo` for tallying and
//! `vm_workflow` for the ballot lifecycle.

pub mod clock;
pub mod errors;
pub mod ids;
pub mod rng;
pub mod uuidgen;

pub use clock::{Clock, SystemClock};
pub use errors::CoreError;
pub use ids::{BallotNumber, Stage, VoterCode};
pub use rng::BallotRng;
pub use uuidgen::{RandomUuidSource, UuidSource};

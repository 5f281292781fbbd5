//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the seedable random source, and error
//! types that form the vocabulary of the consultation domain.

mod errors;
mod ids;
mod random;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ParticipantId, RoomKey};
pub use random::{simulation_rng, SimulationRng};
pub use timestamp::Timestamp;

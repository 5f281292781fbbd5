//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, randomness)
//! - `patient` - Condition catalog, patient profiles and their generator
//! - `consultation` - Rooms, intent classification and simulated replies

pub mod consultation;
pub mod foundation;
pub mod patient;

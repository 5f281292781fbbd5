//! Simulated patient cases.
//!
//! - [`catalog`] - Fixed condition catalog and name roster
//! - [`profile`] - The immutable case data for one room
//! - [`generator`] - Random profile generation from the catalog

mod catalog;
mod generator;
mod profile;

pub use catalog::{Condition, ConditionTraits, TemperatureRange, PATIENT_NAMES};
pub use generator::ProfileGenerator;
pub use profile::{CoughType, Profile};

//! HTTP adapters - REST API implementations.
//!
//! - `patients` - patient directory and health check

pub mod patients;

pub use patients::{patient_routes, PatientHandlers, PatientListResponse};

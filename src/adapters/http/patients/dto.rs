//! HTTP DTOs for the patient directory.

use serde::Serialize;

use crate::domain::consultation::PatientListing;

/// Directory response; listings serialize in the same shape as the
/// WebSocket `patients_list` frame.
#[derive(Debug, Clone, Serialize)]
pub struct PatientListResponse {
    pub patients: Vec<PatientListing>,
    pub total: usize,
}

impl From<Vec<PatientListing>> for PatientListResponse {
    fn from(patients: Vec<PatientListing>) -> Self {
        Self {
            total: patients.len(),
            patients,
        }
    }
}

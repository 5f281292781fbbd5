//! ListPatientsHandler - Query handler for the patient directory.

use std::sync::Arc;

use crate::domain::consultation::{PatientListing, RoomRegistry};

/// Returns every room that has a generated patient.
pub struct ListPatientsHandler {
    registry: Arc<RoomRegistry>,
}

impl ListPatientsHandler {
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn handle(&self) -> Vec<PatientListing> {
        self.registry.snapshot().await
    }
}

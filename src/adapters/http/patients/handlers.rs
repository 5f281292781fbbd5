//! HTTP handlers for the patient directory.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::application::ListPatientsHandler;

use super::dto::PatientListResponse;

#[derive(Clone)]
pub struct PatientHandlers {
    list_handler: Arc<ListPatientsHandler>,
}

impl PatientHandlers {
    pub fn new(list_handler: Arc<ListPatientsHandler>) -> Self {
        Self { list_handler }
    }
}

/// GET /api/patients - Every room with a generated patient
pub async fn list_patients(State(handlers): State<PatientHandlers>) -> impl IntoResponse {
    let patients = handlers.list_handler.handle().await;
    (StatusCode::OK, Json(PatientListResponse::from(patients)))
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}

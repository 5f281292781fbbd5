//! HTTP routes for the patient directory.

use axum::{routing::get, Router};

use super::handlers::{health, list_patients, PatientHandlers};

/// Creates the patient router: `/api/patients` and `/health`.
pub fn patient_routes(handlers: PatientHandlers) -> Router {
    Router::new()
        .route("/api/patients", get(list_patients))
        .route("/health", get(health))
        .with_state(handlers)
}

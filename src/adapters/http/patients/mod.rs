//! HTTP adapter for the patient directory.

mod dto;
mod handlers;
mod routes;

pub use dto::PatientListResponse;
pub use handlers::PatientHandlers;
pub use routes::patient_routes;

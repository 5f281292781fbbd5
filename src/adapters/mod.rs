//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `websocket` - Live rooms over WebSocket (production `RoomBroadcaster`)
//! - `http` - Patient directory and health endpoints
//! - `events` - In-memory broadcaster for tests

pub mod events;
pub mod http;
pub mod websocket;

pub use events::{Delivery, InMemoryBroadcaster};
pub use http::{patient_routes, PatientHandlers};
pub use websocket::{websocket_router, RoomManager, WebSocketState};

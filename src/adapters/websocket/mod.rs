//! WebSocket adapter for consultation rooms.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Consultation handlers                             │
//! │   join / message / typing / leave, simulated patient replies        │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ RoomBroadcaster
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      RoomManager                                     │
//! │   Room: chat:p-1       Room: chat:p-2                                │
//! │   ├── doctor-a         └── doctor-c                                  │
//! │   └── patient-b                                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ per-connection forwarder
//!                                     ▼
//!                              WebSocket clients
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`rooms`] - Room management and the broadcaster implementation
//! - [`handler`] - Axum WebSocket upgrade handler

pub mod handler;
pub mod messages;
pub mod rooms;

pub use handler::{websocket_router, ws_handler, WebSocketState};
pub use messages::{
    ClientMessage, ErrorMessage, JoinRequest, JoinedMessage, MessageRequest, PatientsListMessage,
    PongMessage, PresenceMessage, ServerMessage, TypingRequest,
};
pub use rooms::{Outbound, RoomManager};

//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RoomBroadcaster` - Delivers room events to connected participants

mod room_broadcaster;

pub use room_broadcaster::RoomBroadcaster;

//! RoomBroadcaster port - Delivering room events to connected participants.
//!
//! The consultation handlers only know this trait; the WebSocket adapter
//! fans events out over per-room channels and tests record them in memory.

use async_trait::async_trait;

use crate::domain::consultation::RoomEvent;
use crate::domain::foundation::{ParticipantId, RoomKey};

/// Port for delivering events to the participants of one room.
///
/// Implementations must ensure:
/// - Events for the same room are delivered in the order they were broadcast
/// - Broadcasting to an empty or unknown room is a no-op, not an error
#[async_trait]
pub trait RoomBroadcaster: Send + Sync {
    /// Delivers `event` to every participant in the room.
    ///
    /// Returns the number of recipients reached.
    async fn broadcast(&self, room: &RoomKey, event: RoomEvent) -> usize;

    /// Delivers `event` to every participant except `skip`.
    async fn broadcast_except(&self, room: &RoomKey, skip: &ParticipantId, event: RoomEvent)
        -> usize;
}

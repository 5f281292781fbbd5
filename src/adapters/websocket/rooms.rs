//! WebSocket room management for consultation message routing.
//!
//! Rooms are organized by patient room key, so a broadcast reaches exactly
//! the connections that joined that patient's conversation.
//!
//! # Architecture
//!
//! ```text
//! Room: chat:p-1       Room: chat:p-2
//! ├── doctor-a         ├── doctor-c
//! └── patient-b        └── doctor-d
//! ```
//!
//! When an event occurs for p-1, only a and b receive it.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use crate::domain::consultation::RoomEvent;
use crate::domain::foundation::{ParticipantId, RoomKey};
use crate::ports::RoomBroadcaster;

/// An event travelling through a room channel.
#[derive(Debug, Clone)]
pub struct Outbound {
    pub event: RoomEvent,
    /// Connection that must not receive this event.
    pub skip: Option<ParticipantId>,
}

impl Outbound {
    /// Whether the connection `participant` should deliver this event.
    pub fn is_for(&self, participant: &ParticipantId) -> bool {
        self.skip.as_ref() != Some(participant)
    }
}

/// Manages WebSocket connection rooms organized by room key.
///
/// Provides:
/// - Connection join/leave operations
/// - Broadcast to all connections in a room, optionally skipping one
/// - Automatic cleanup of empty rooms
///
/// # Thread Safety
///
/// Uses `RwLock` for the room registry since broadcasts (reads) vastly
/// outnumber joins/leaves (writes). This allows concurrent broadcasts
/// to different rooms. Each room's channel preserves broadcast order.
pub struct RoomManager {
    /// Map of room key → broadcast sender for that room.
    rooms: RwLock<HashMap<RoomKey, broadcast::Sender<Outbound>>>,

    /// Map of participant → room for O(1) cleanup on disconnect.
    participant_rooms: RwLock<HashMap<ParticipantId, RoomKey>>,

    /// Channel capacity for each room's broadcast channel.
    channel_capacity: usize,
}

impl RoomManager {
    /// Create a new room manager with specified channel capacity.
    ///
    /// # Arguments
    ///
    /// * `channel_capacity` - Buffer size for each room's broadcast channel.
    ///   Slow connections that fall further behind than this miss events.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            participant_rooms: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Create with default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Join a connection to a room.
    ///
    /// If the room doesn't exist, it's created automatically.
    /// Returns a receiver for every event broadcast to that room.
    pub async fn join(
        &self,
        room: &RoomKey,
        participant: ParticipantId,
    ) -> broadcast::Receiver<Outbound> {
        let mut rooms = self.rooms.write().await;

        let sender = rooms.entry(room.clone()).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });

        self.participant_rooms
            .write()
            .await
            .insert(participant, room.clone());

        sender.subscribe()
    }

    /// Remove a connection from its room.
    ///
    /// The connection's receiver must already be dropped for the room to be
    /// cleaned up when it becomes empty.
    pub async fn leave(&self, participant: &ParticipantId) {
        let removed = self.participant_rooms.write().await.remove(participant);

        if let Some(room) = removed {
            let mut rooms = self.rooms.write().await;
            if rooms
                .get(&room)
                .is_some_and(|sender| sender.receiver_count() == 0)
            {
                rooms.remove(&room);
            }
        }
    }

    /// Broadcast an event to every connection in a room.
    ///
    /// Returns the number of receivers the event was queued for. If no
    /// connections are in the room, this is a no-op returning 0.
    pub async fn broadcast_to_room(&self, room: &RoomKey, outbound: Outbound) -> usize {
        let rooms = self.rooms.read().await;

        match rooms.get(room) {
            // Send fails only when there are no receivers
            Some(sender) => sender.send(outbound).unwrap_or(0),
            None => 0,
        }
    }

    /// Room the connection is currently in, if any.
    pub async fn room_of(&self, participant: &ParticipantId) -> Option<RoomKey> {
        self.participant_rooms.read().await.get(participant).cloned()
    }

    /// Get count of connected clients in a specific room.
    pub async fn client_count(&self, room: &RoomKey) -> usize {
        let rooms = self.rooms.read().await;
        rooms.get(room).map(|s| s.receiver_count()).unwrap_or(0)
    }

    /// Get all active room keys (for monitoring/debugging).
    pub async fn active_rooms(&self) -> Vec<RoomKey> {
        self.rooms.read().await.keys().cloned().collect()
    }

    /// Get total count of connected clients across all rooms.
    pub async fn total_client_count(&self) -> usize {
        self.participant_rooms.read().await.len()
    }
}

impl Default for RoomManager {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl RoomBroadcaster for RoomManager {
    async fn broadcast(&self, room: &RoomKey, event: RoomEvent) -> usize {
        self.broadcast_to_room(room, Outbound { event, skip: None })
            .await
    }

    async fn broadcast_except(
        &self,
        room: &RoomKey,
        skip: &ParticipantId,
        event: RoomEvent,
    ) -> usize {
        let skipped_is_here = self.room_of(skip).await.as_ref() == Some(room);
        let queued = self
            .broadcast_to_room(
                room,
                Outbound {
                    event,
                    skip: Some(*skip),
                },
            )
            .await;
        if skipped_is_here {
            queued.saturating_sub(1)
        } else {
            queued
        }
    }
}

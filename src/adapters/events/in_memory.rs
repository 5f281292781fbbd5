//! In-memory room broadcaster for testing.
//!
//! Records every broadcast in order so tests can assert on exactly what a
//! room would have seen.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in production.
//! It uses `.expect()` on lock operations which will panic if locks are poisoned.
//! Production code should use the WebSocket `RoomManager`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::consultation::{ChatMessage, PatientEvent, RoomEvent};
use crate::domain::foundation::{ParticipantId, RoomKey};
use crate::ports::RoomBroadcaster;

/// One recorded call to the broadcaster.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub room: RoomKey,
    /// Participant excluded from delivery, for `broadcast_except`.
    pub skip: Option<ParticipantId>,
    pub event: RoomEvent,
}

/// In-memory broadcaster for testing.
///
/// Features:
/// - Delivery capture in broadcast order
/// - Optional member tracking so recipient counts are meaningful
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
///
/// # Example
///
/// ```ignore
/// let broadcaster = Arc::new(InMemoryBroadcaster::new());
/// broadcaster.broadcast(&room, RoomEvent::message("hi", Role::Doctor, "Dr. A")).await;
///
/// assert_eq!(broadcaster.messages(&room).len(), 1);
/// ```
pub struct InMemoryBroadcaster {
    members: RwLock<HashMap<RoomKey, Vec<ParticipantId>>>,
    deliveries: RwLock<Vec<Delivery>>,
}

impl InMemoryBroadcaster {
    /// Creates a new broadcaster with no members and no deliveries.
    pub fn new() -> Self {
        Self {
            members: RwLock::new(HashMap::new()),
            deliveries: RwLock::new(Vec::new()),
        }
    }

    /// Counts `participant` as a recipient of `room`'s broadcasts.
    pub fn connect(&self, room: &RoomKey, participant: ParticipantId) {
        self.members
            .write()
            .expect("InMemoryBroadcaster: members lock poisoned")
            .entry(room.clone())
            .or_default()
            .push(participant);
    }

    pub fn disconnect(&self, room: &RoomKey, participant: &ParticipantId) {
        if let Some(members) = self
            .members
            .write()
            .expect("InMemoryBroadcaster: members lock poisoned")
            .get_mut(room)
        {
            members.retain(|id| id != participant);
        }
    }

    // === Test Helpers ===

    /// Returns every recorded delivery in broadcast order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .read()
            .expect("InMemoryBroadcaster: deliveries lock poisoned")
            .clone()
    }

    /// Returns the events broadcast to `room`, in order.
    pub fn events_for(&self, room: &RoomKey) -> Vec<RoomEvent> {
        self.deliveries()
            .into_iter()
            .filter(|d| &d.room == room)
            .map(|d| d.event)
            .collect()
    }

    /// Returns the chat messages broadcast to `room`, in order.
    pub fn messages(&self, room: &RoomKey) -> Vec<ChatMessage> {
        self.events_for(room)
            .into_iter()
            .filter_map(|event| match event {
                RoomEvent::Message(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Returns the patient lifecycle events broadcast to `room`, in order.
    pub fn patient_events(&self, room: &RoomKey) -> Vec<PatientEvent> {
        self.events_for(room)
            .into_iter()
            .filter_map(|event| match event {
                RoomEvent::PatientEvent(event) => Some(event),
                _ => None,
            })
            .collect()
    }

    /// Returns count of recorded deliveries.
    pub fn event_count(&self) -> usize {
        self.deliveries
            .read()
            .expect("InMemoryBroadcaster: deliveries lock poisoned")
            .len()
    }

    /// Clears all recorded deliveries (for test isolation).
    pub fn clear(&self) {
        self.deliveries
            .write()
            .expect("InMemoryBroadcaster: deliveries write lock poisoned")
            .clear();
    }

    fn record(&self, room: &RoomKey, skip: Option<ParticipantId>, event: RoomEvent) -> usize {
        let recipients = self
            .members
            .read()
            .expect("InMemoryBroadcaster: members lock poisoned")
            .get(room)
            .map(|members| members.iter().filter(|id| Some(**id) != skip).count())
            .unwrap_or(0);

        self.deliveries
            .write()
            .expect("InMemoryBroadcaster: deliveries write lock poisoned")
            .push(Delivery {
                room: room.clone(),
                skip,
                event,
            });
        recipients
    }
}

impl Default for InMemoryBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomBroadcaster for InMemoryBroadcaster {
    async fn broadcast(&self, room: &RoomKey, event: RoomEvent) -> usize {
        self.record(room, None, event)
    }

    async fn broadcast_except(
        &self,
        room: &RoomKey,
        skip: &ParticipantId,
        event: RoomEvent,
    ) -> usize {
        self.record(room, Some(*skip), event)
    }
}

//! Room registry: membership, conversation state and greeting bookkeeping.
//!
//! A single registry-wide lock serializes every touch. Create-once state and
//! greet-once semantics follow from deciding both under that lock.

use std::collections::HashMap;

use serde::Serialize;
use tokio::sync::Mutex;

use super::participant::{Participant, Role};
use super::state::ConversationState;
use crate::domain::foundation::{ParticipantId, RoomKey, SimulationRng};
use crate::domain::patient::{Condition, Profile, ProfileGenerator};

/// Directory entry for one room that has a generated patient.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientListing {
    pub room_key: RoomKey,
    pub name: String,
    pub age: u8,
    pub condition: Condition,
    /// True while a patient-role participant is connected.
    pub online: bool,
    pub profile: Profile,
}

#[derive(Debug, Default)]
struct Room {
    participants: Vec<Participant>,
    state: Option<ConversationState>,
    greeted: bool,
}

impl Room {
    fn is_disposable(&self) -> bool {
        self.participants.is_empty() && self.state.is_none() && !self.greeted
    }
}

struct Inner {
    rooms: HashMap<RoomKey, Room>,
    rng: SimulationRng,
    generator: ProfileGenerator,
}

impl Inner {
    fn conversation(&mut self, key: &RoomKey) -> (&mut ConversationState, &mut SimulationRng) {
        let Inner {
            rooms,
            rng,
            generator,
        } = self;
        let room = rooms.entry(key.clone()).or_default();
        let state = room.state.get_or_insert_with(|| {
            let profile = generator.generate(&mut *rng);
            tracing::info!(
                room = %key,
                patient = %profile.name,
                condition = %profile.condition,
                "Generated patient profile"
            );
            ConversationState::new(profile)
        });
        (state, rng)
    }
}

/// Owns every room known to the process.
pub struct RoomRegistry {
    inner: Mutex<Inner>,
}

impl RoomRegistry {
    pub fn new(rng: SimulationRng) -> Self {
        Self {
            inner: Mutex::new(Inner {
                rooms: HashMap::new(),
                rng,
                generator: ProfileGenerator::new(),
            }),
        }
    }

    /// Returns the room's conversation state, generating it on first use.
    ///
    /// Idempotent: every caller for the same key observes the same profile.
    pub async fn resolve_or_create_state(&self, key: &RoomKey) -> ConversationState {
        let mut inner = self.inner.lock().await;
        inner.conversation(key).0.clone()
    }

    /// Runs `f` with exclusive access to the room's state and the registry's
    /// random source, creating the state first if needed.
    pub async fn with_conversation<T>(
        &self,
        key: &RoomKey,
        f: impl FnOnce(&mut ConversationState, &mut SimulationRng) -> T,
    ) -> T {
        let mut inner = self.inner.lock().await;
        let (state, rng) = inner.conversation(key);
        f(state, rng)
    }

    /// Adds a participant and returns the updated roster.
    pub async fn add_participant(
        &self,
        key: &RoomKey,
        participant: Participant,
    ) -> Vec<Participant> {
        let mut inner = self.inner.lock().await;
        let room = inner.rooms.entry(key.clone()).or_default();
        room.participants.push(participant);
        room.participants.clone()
    }

    /// Removes a participant, returning it with the remaining roster.
    ///
    /// Rooms that end up empty and never acquired a patient are dropped.
    pub async fn remove_participant(
        &self,
        key: &RoomKey,
        id: &ParticipantId,
    ) -> Option<(Participant, Vec<Participant>)> {
        let mut inner = self.inner.lock().await;
        let room = inner.rooms.get_mut(key)?;
        let index = room.participants.iter().position(|p| &p.id == id)?;
        let removed = room.participants.remove(index);
        let roster = room.participants.clone();
        if room.is_disposable() {
            inner.rooms.remove(key);
        }
        Some((removed, roster))
    }

    pub async fn participant(&self, key: &RoomKey, id: &ParticipantId) -> Option<Participant> {
        let inner = self.inner.lock().await;
        inner
            .rooms
            .get(key)?
            .participants
            .iter()
            .find(|p| &p.id == id)
            .cloned()
    }

    pub async fn participants(&self, key: &RoomKey) -> Vec<Participant> {
        let inner = self.inner.lock().await;
        inner
            .rooms
            .get(key)
            .map(|room| room.participants.clone())
            .unwrap_or_default()
    }

    /// Keys of rooms with at least one connected participant.
    pub async fn active_rooms(&self) -> Vec<RoomKey> {
        let inner = self.inner.lock().await;
        let mut keys: Vec<RoomKey> = inner
            .rooms
            .iter()
            .filter(|(_, room)| !room.participants.is_empty())
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    pub async fn has_greeted(&self, key: &RoomKey) -> bool {
        let inner = self.inner.lock().await;
        inner.rooms.get(key).is_some_and(|room| room.greeted)
    }

    pub async fn mark_greeted(&self, key: &RoomKey) {
        let mut inner = self.inner.lock().await;
        inner.rooms.entry(key.clone()).or_default().greeted = true;
    }

    /// Marks the room greeted, returning `true` only for the first caller.
    pub async fn claim_greeting(&self, key: &RoomKey) -> bool {
        let mut inner = self.inner.lock().await;
        let room = inner.rooms.entry(key.clone()).or_default();
        if room.greeted {
            return false;
        }
        room.greeted = true;
        true
    }

    /// Directory of every room with a generated patient, ordered by key.
    pub async fn snapshot(&self) -> Vec<PatientListing> {
        let inner = self.inner.lock().await;
        let mut listings: Vec<PatientListing> = inner
            .rooms
            .iter()
            .filter_map(|(key, room)| {
                let profile = room.state.as_ref()?.profile().clone();
                Some(PatientListing {
                    room_key: key.clone(),
                    name: profile.name.clone(),
                    age: profile.age,
                    condition: profile.condition,
                    online: room.participants.iter().any(|p| p.role == Role::Patient),
                    profile,
                })
            })
            .collect();
        listings.sort_by(|a, b| a.room_key.cmp(&b.room_key));
        listings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::simulation_rng;
    use std::sync::Arc;

    fn registry() -> RoomRegistry {
        RoomRegistry::new(simulation_rng(Some(42)))
    }

    fn key(id: &str) -> RoomKey {
        RoomKey::new(id).unwrap()
    }

    fn doctor() -> Participant {
        Participant::new(ParticipantId::new(), Role::Doctor, Some("Dr. Lee".to_string()))
    }

    fn patient() -> Participant {
        Participant::new(ParticipantId::new(), Role::Patient, None)
    }

    #[tokio::test]
    async fn resolve_or_create_state_is_idempotent() {
        let registry = registry();
        let first = registry.resolve_or_create_state(&key("p-1")).await;
        let second = registry.resolve_or_create_state(&key("p-1")).await;
        assert_eq!(first.profile(), second.profile());
    }

    #[tokio::test]
    async fn rooms_get_independent_state() {
        let registry = registry();
        registry.resolve_or_create_state(&key("p-1")).await;
        registry
            .with_conversation(&key("p-1"), |state, _| {
                let symptom = state.profile().symptoms[0].clone();
                state.disclose(&symptom);
            })
            .await;

        let other = registry.resolve_or_create_state(&key("p-2")).await;
        assert!(other.disclosed_symptoms().is_empty());
        let same = registry.resolve_or_create_state(&key("p-1")).await;
        assert_eq!(same.disclosed_symptoms().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_resolution_observes_one_profile() {
        let registry = Arc::new(registry());
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.resolve_or_create_state(&key("p-1")).await })
            })
            .collect();

        let mut profiles = Vec::new();
        for handle in handles {
            profiles.push(handle.await.unwrap().profile().clone());
        }
        assert!(profiles.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn claim_greeting_succeeds_once() {
        let registry = registry();
        assert!(!registry.has_greeted(&key("p-1")).await);
        assert!(registry.claim_greeting(&key("p-1")).await);
        assert!(!registry.claim_greeting(&key("p-1")).await);
        assert!(registry.has_greeted(&key("p-1")).await);
    }

    #[tokio::test]
    async fn mark_greeted_blocks_later_claims() {
        let registry = registry();
        registry.mark_greeted(&key("p-1")).await;
        assert!(!registry.claim_greeting(&key("p-1")).await);
    }

    #[tokio::test]
    async fn membership_roundtrip() {
        let registry = registry();
        let d = doctor();
        let p = patient();

        registry.add_participant(&key("p-1"), d.clone()).await;
        let roster = registry.add_participant(&key("p-1"), p.clone()).await;
        assert_eq!(roster.len(), 2);
        assert_eq!(registry.participant(&key("p-1"), &d.id).await, Some(d.clone()));

        let (removed, roster) = registry.remove_participant(&key("p-1"), &d.id).await.unwrap();
        assert_eq!(removed, d);
        assert_eq!(roster, vec![p]);
    }

    #[tokio::test]
    async fn removing_unknown_participant_is_none() {
        let registry = registry();
        registry.add_participant(&key("p-1"), doctor()).await;
        assert!(registry
            .remove_participant(&key("p-1"), &ParticipantId::new())
            .await
            .is_none());
        assert!(registry
            .remove_participant(&key("nope"), &ParticipantId::new())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn empty_room_without_state_is_dropped() {
        let registry = registry();
        let p = patient();
        registry.add_participant(&key("p-1"), p.clone()).await;
        registry.remove_participant(&key("p-1"), &p.id).await;
        assert!(registry.active_rooms().await.is_empty());
        assert!(registry.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn state_survives_room_emptying() {
        let registry = registry();
        let d = doctor();
        registry.add_participant(&key("p-1"), d.clone()).await;
        let state = registry.resolve_or_create_state(&key("p-1")).await;
        registry.mark_greeted(&key("p-1")).await;
        registry.remove_participant(&key("p-1"), &d.id).await;

        assert!(registry.active_rooms().await.is_empty());
        assert!(registry.has_greeted(&key("p-1")).await);
        let again = registry.resolve_or_create_state(&key("p-1")).await;
        assert_eq!(again.profile(), state.profile());
    }

    #[tokio::test]
    async fn snapshot_reports_patient_presence() {
        let registry = registry();
        let p = patient();
        registry.add_participant(&key("p-2"), doctor()).await;
        registry.add_participant(&key("p-1"), p.clone()).await;
        registry.resolve_or_create_state(&key("p-1")).await;
        registry.resolve_or_create_state(&key("p-2")).await;

        let listings = registry.snapshot().await;
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].room_key, key("p-1"));
        assert!(listings[0].online);
        assert!(!listings[1].online);
        assert_eq!(listings[0].name, listings[0].profile.name);

        let json = serde_json::to_value(&listings[0]).unwrap();
        assert_eq!(json["roomKey"], "p-1");
        assert!(json["online"].as_bool().unwrap());
    }

    #[tokio::test]
    async fn active_rooms_lists_occupied_rooms_only() {
        let registry = registry();
        registry.add_participant(&key("b"), doctor()).await;
        registry.add_participant(&key("a"), patient()).await;
        registry.resolve_or_create_state(&key("c")).await;
        assert_eq!(registry.active_rooms().await, vec![key("a"), key("b")]);
    }
}

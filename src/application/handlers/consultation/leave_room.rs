//! LeaveRoomHandler - Command handler for participants leaving a room.

use std::sync::Arc;

use crate::domain::consultation::{Participant, PatientEvent, Role, RoomEvent, RoomRegistry};
use crate::domain::foundation::{ParticipantId, RoomKey};
use crate::ports::RoomBroadcaster;

#[derive(Debug, Clone)]
pub struct LeaveRoomCommand {
    pub room_key: RoomKey,
    pub participant_id: ParticipantId,
}

#[derive(Debug, Clone)]
pub struct LeaveRoomResult {
    pub participant: Participant,
    pub roster: Vec<Participant>,
}

/// Handler for disconnects. Scheduled replies are left to run.
pub struct LeaveRoomHandler {
    registry: Arc<RoomRegistry>,
    broadcaster: Arc<dyn RoomBroadcaster>,
}

impl LeaveRoomHandler {
    pub fn new(registry: Arc<RoomRegistry>, broadcaster: Arc<dyn RoomBroadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// Returns `None` when the participant was not in the room.
    pub async fn handle(&self, cmd: LeaveRoomCommand) -> Option<LeaveRoomResult> {
        let (participant, roster) = self
            .registry
            .remove_participant(&cmd.room_key, &cmd.participant_id)
            .await?;
        tracing::info!(
            room = %cmd.room_key,
            participant = %participant.id,
            role = %participant.role,
            "Participant left"
        );

        self.broadcaster
            .broadcast(&cmd.room_key, RoomEvent::presence(&roster))
            .await;
        if participant.role == Role::Patient {
            self.broadcaster
                .broadcast(
                    &cmd.room_key,
                    RoomEvent::PatientEvent(PatientEvent::disconnected(cmd.room_key.clone())),
                )
                .await;
        }

        Some(LeaveRoomResult {
            participant,
            roster,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryBroadcaster;
    use crate::domain::consultation::PatientEventKind;
    use crate::domain::foundation::simulation_rng;

    struct Fixture {
        registry: Arc<RoomRegistry>,
        broadcaster: Arc<InMemoryBroadcaster>,
        handler: LeaveRoomHandler,
        room: RoomKey,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(RoomRegistry::new(simulation_rng(Some(2))));
        let broadcaster = Arc::new(InMemoryBroadcaster::new());
        let handler = LeaveRoomHandler::new(registry.clone(), broadcaster.clone());
        Fixture {
            registry,
            broadcaster,
            handler,
            room: RoomKey::new("p-5").unwrap(),
        }
    }

    fn leave(f: &Fixture, id: ParticipantId) -> LeaveRoomCommand {
        LeaveRoomCommand {
            room_key: f.room.clone(),
            participant_id: id,
        }
    }

    #[tokio::test]
    async fn doctor_leave_broadcasts_presence() {
        let f = fixture();
        let doctor = Participant::new(ParticipantId::new(), Role::Doctor, None);
        let patient = Participant::new(ParticipantId::new(), Role::Patient, None);
        f.registry.add_participant(&f.room, doctor.clone()).await;
        f.registry.add_participant(&f.room, patient.clone()).await;

        let result = f.handler.handle(leave(&f, doctor.id)).await.unwrap();
        assert_eq!(result.participant, doctor);
        assert_eq!(result.roster, vec![patient]);

        let events = f.broadcaster.events_for(&f.room);
        assert_eq!(events, vec![RoomEvent::presence(&result.roster)]);
    }

    #[tokio::test]
    async fn patient_leave_announces_disconnect() {
        let f = fixture();
        let patient = Participant::new(ParticipantId::new(), Role::Patient, None);
        f.registry.add_participant(&f.room, patient.clone()).await;

        f.handler.handle(leave(&f, patient.id)).await.unwrap();

        let patient_events = f.broadcaster.patient_events(&f.room);
        assert_eq!(patient_events.len(), 1);
        assert_eq!(patient_events[0].kind, PatientEventKind::Disconnected);
        assert_eq!(patient_events[0].message, "Patient disconnected");
    }

    #[tokio::test]
    async fn unknown_participant_is_a_no_op() {
        let f = fixture();
        assert!(f.handler.handle(leave(&f, ParticipantId::new())).await.is_none());
        assert_eq!(f.broadcaster.event_count(), 0);
    }
}

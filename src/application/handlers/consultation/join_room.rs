//! JoinRoomHandler - Command handler for participants entering a room.
//!
//! The first doctor to reach a room triggers the simulated patient: the
//! room's profile is announced and, after a short pause, the patient opens
//! with its complaint. Later doctors join silently.

use std::sync::Arc;

use thiserror::Error;

use super::timing::{broadcast_after, ResponseTiming};
use crate::domain::consultation::{
    Participant, PatientEvent, ReplyEngine, Role, RoomEvent, RoomRegistry,
};
use crate::domain::foundation::{DomainError, ErrorCode, ParticipantId, RoomKey, ValidationError};
use crate::domain::patient::Profile;
use crate::ports::RoomBroadcaster;

/// Command to join a room, as received from the transport.
#[derive(Debug, Clone)]
pub struct JoinRoomCommand {
    /// Connection identity assigned by the transport.
    pub participant_id: ParticipantId,
    pub patient_id: Option<String>,
    pub role: Option<String>,
    pub display_name: Option<String>,
}

/// Result of a successful join.
#[derive(Debug, Clone)]
pub struct JoinRoomResult {
    pub room_key: RoomKey,
    pub participant: Participant,
    pub roster: Vec<Participant>,
    /// The room's patient, for doctor joins.
    pub patient: Option<Profile>,
    /// True when this join started the patient's greeting sequence.
    pub greeted: bool,
}

/// Join requests rejected before anything is mutated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("Missing required field '{0}'")]
    MissingField(String),

    #[error("Unknown role '{0}', expected 'doctor' or 'patient'")]
    UnknownRole(String),
}

impl JoinRoomError {
    pub fn code(&self) -> ErrorCode {
        match self {
            JoinRoomError::MissingField(_) => ErrorCode::MissingField,
            JoinRoomError::UnknownRole(_) => ErrorCode::UnknownRole,
        }
    }
}

impl From<JoinRoomError> for DomainError {
    fn from(err: JoinRoomError) -> Self {
        let field = match &err {
            JoinRoomError::MissingField(field) => field.clone(),
            JoinRoomError::UnknownRole(_) => "role".to_string(),
        };
        DomainError::new(err.code(), err.to_string()).with_detail("field", field)
    }
}

/// Handler for joining rooms.
pub struct JoinRoomHandler {
    registry: Arc<RoomRegistry>,
    broadcaster: Arc<dyn RoomBroadcaster>,
    timing: ResponseTiming,
    engine: ReplyEngine,
}

impl JoinRoomHandler {
    pub fn new(
        registry: Arc<RoomRegistry>,
        broadcaster: Arc<dyn RoomBroadcaster>,
        timing: ResponseTiming,
    ) -> Self {
        Self {
            registry,
            broadcaster,
            timing,
            engine: ReplyEngine::new(),
        }
    }

    pub async fn handle(&self, cmd: JoinRoomCommand) -> Result<JoinRoomResult, JoinRoomError> {
        // 1. Validate everything before touching the registry
        let room_key = parse_room_key(cmd.patient_id.as_deref())?;
        let role = parse_role(cmd.role.as_deref())?;
        let participant = Participant::new(cmd.participant_id, role, cmd.display_name);

        // 2. Membership and presence
        let roster = self
            .registry
            .add_participant(&room_key, participant.clone())
            .await;
        tracing::info!(
            room = %room_key,
            participant = %participant.id,
            role = %role,
            "Participant joined"
        );
        self.broadcaster
            .broadcast(&room_key, RoomEvent::presence(&roster))
            .await;

        if role != Role::Doctor {
            return Ok(JoinRoomResult {
                room_key,
                participant,
                roster,
                patient: None,
                greeted: false,
            });
        }

        // 3. A doctor is present: the patient exists from now on
        let state = self.registry.resolve_or_create_state(&room_key).await;
        let profile = state.profile().clone();

        // 4. Greet exactly once per room
        let greeted = self.registry.claim_greeting(&room_key).await;
        if greeted {
            self.broadcaster
                .broadcast(
                    &room_key,
                    RoomEvent::PatientEvent(PatientEvent::connected(
                        room_key.clone(),
                        profile.clone(),
                    )),
                )
                .await;

            let opening = self.engine.opening_complaint(&profile);
            broadcast_after(
                self.broadcaster.clone(),
                room_key.clone(),
                self.timing.greeting_delay,
                vec![RoomEvent::message(opening, Role::Patient, profile.name.clone())],
            );
            tracing::debug!(room = %room_key, "Scheduled opening complaint");
        }

        Ok(JoinRoomResult {
            room_key,
            participant,
            roster,
            patient: Some(profile),
            greeted,
        })
    }
}

fn parse_room_key(patient_id: Option<&str>) -> Result<RoomKey, JoinRoomError> {
    RoomKey::new(patient_id.unwrap_or_default())
        .map_err(|_| JoinRoomError::MissingField("patientId".to_string()))
}

fn parse_role(role: Option<&str>) -> Result<Role, JoinRoomError> {
    let raw = role.unwrap_or_default();
    raw.parse::<Role>().map_err(|err| match err {
        ValidationError::EmptyField { field } => JoinRoomError::MissingField(field),
        ValidationError::InvalidFormat { .. } => JoinRoomError::UnknownRole(raw.trim().to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryBroadcaster;
    use crate::domain::consultation::PatientEventKind;
    use crate::domain::foundation::simulation_rng;
    use std::time::Duration;

    struct Fixture {
        registry: Arc<RoomRegistry>,
        broadcaster: Arc<InMemoryBroadcaster>,
        handler: JoinRoomHandler,
    }

    fn fixture() -> Fixture {
        let registry = Arc::new(RoomRegistry::new(simulation_rng(Some(11))));
        let broadcaster = Arc::new(InMemoryBroadcaster::new());
        let handler = JoinRoomHandler::new(
            registry.clone(),
            broadcaster.clone(),
            ResponseTiming::default(),
        );
        Fixture {
            registry,
            broadcaster,
            handler,
        }
    }

    fn join(patient_id: &str, role: &str, name: Option<&str>) -> JoinRoomCommand {
        JoinRoomCommand {
            participant_id: ParticipantId::new(),
            patient_id: Some(patient_id.to_string()),
            role: Some(role.to_string()),
            display_name: name.map(str::to_string),
        }
    }

    fn room(id: &str) -> RoomKey {
        RoomKey::new(id).unwrap()
    }

    #[tokio::test]
    async fn patient_join_broadcasts_presence_only() {
        let f = fixture();
        let result = f.handler.handle(join("p-1", "patient", None)).await.unwrap();

        assert_eq!(result.participant.display_name, "patient");
        assert!(result.patient.is_none());
        assert!(!result.greeted);

        let events = f.broadcaster.events_for(&room("p-1"));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), "presence");
        assert!(f.registry.snapshot().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn first_doctor_join_announces_patient_then_opens() {
        let f = fixture();
        let result = f
            .handler
            .handle(join("p-1", "doctor", Some("Dr. Lee")))
            .await
            .unwrap();
        assert!(result.greeted);
        let profile = result.patient.unwrap();

        let patient_events = f.broadcaster.patient_events(&room("p-1"));
        assert_eq!(patient_events.len(), 1);
        assert_eq!(patient_events[0].kind, PatientEventKind::Connected);
        assert_eq!(patient_events[0].profile.as_ref(), Some(&profile));
        assert!(f.broadcaster.messages(&room("p-1")).is_empty());

        tokio::time::sleep(Duration::from_millis(450)).await;
        let messages = f.broadcaster.messages(&room("p-1"));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::Patient);
        assert_eq!(messages[0].display_name, profile.name);
        assert!(messages[0]
            .text
            .starts_with(&format!("Hello doctor, my name is {}.", profile.name)));
    }

    #[tokio::test(start_paused = true)]
    async fn second_doctor_join_does_not_greet_again() {
        let f = fixture();
        let first = f.handler.handle(join("p-1", "doctor", None)).await.unwrap();
        let second = f.handler.handle(join("p-1", "doctor", None)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(first.greeted);
        assert!(!second.greeted);
        assert_eq!(first.patient, second.patient);
        assert_eq!(second.roster.len(), 2);
        assert_eq!(f.broadcaster.patient_events(&room("p-1")).len(), 1);
        assert_eq!(f.broadcaster.messages(&room("p-1")).len(), 1);
    }

    #[tokio::test]
    async fn role_is_case_insensitive() {
        let f = fixture();
        let result = f.handler.handle(join("p-1", "DOCTOR", None)).await.unwrap();
        assert_eq!(result.participant.role, Role::Doctor);
    }

    #[tokio::test]
    async fn missing_patient_id_is_rejected_without_side_effects() {
        let f = fixture();
        let mut cmd = join("p-1", "doctor", None);
        cmd.patient_id = Some("   ".to_string());

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert_eq!(err, JoinRoomError::MissingField("patientId".to_string()));
        assert_eq!(err.code(), ErrorCode::MissingField);
        assert_eq!(f.broadcaster.event_count(), 0);
        assert!(f.registry.active_rooms().await.is_empty());
    }

    #[tokio::test]
    async fn missing_role_is_rejected() {
        let f = fixture();
        let mut cmd = join("p-1", "doctor", None);
        cmd.role = None;

        let err = f.handler.handle(cmd).await.unwrap_err();
        assert_eq!(err, JoinRoomError::MissingField("role".to_string()));
        assert_eq!(f.broadcaster.event_count(), 0);
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let f = fixture();
        let err = f.handler.handle(join("p-1", "nurse", None)).await.unwrap_err();
        assert_eq!(err, JoinRoomError::UnknownRole("nurse".to_string()));

        let domain: DomainError = err.into();
        assert_eq!(domain.code, ErrorCode::UnknownRole);
        assert_eq!(domain.details.get("field"), Some(&"role".to_string()));
        assert!(f.registry.active_rooms().await.is_empty());
    }
}

//! Integration tests for a full consultation.
//!
//! These tests drive the public handlers end-to-end:
//! 1. Doctors and patients join rooms keyed by patient
//! 2. The first doctor triggers the simulated patient's greeting
//! 3. Doctor questions are classified and answered after a typing delay
//! 4. Leaving updates presence while the patient case is retained
//!
//! Time is paused, so every simulated delay elapses instantly and in order.

use std::sync::Arc;
use std::time::Duration;

use consult_relay::adapters::InMemoryBroadcaster;
use consult_relay::application::{
    ConsultationHandlers, DropReason, JoinRoomCommand, JoinRoomError, JoinRoomResult,
    LeaveRoomCommand, ResponseTiming, SendMessageCommand, SendOutcome,
};
use consult_relay::domain::consultation::{
    oxford_list, PatientEventKind, Role, RoomEvent, RoomRegistry,
};
use consult_relay::domain::foundation::{simulation_rng, ParticipantId, RoomKey};
use consult_relay::domain::patient::Profile;

/// Longest simulated typing time with default timing, plus slack.
const REPLY_WAIT: Duration = Duration::from_millis(2100);

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Clinic {
    registry: Arc<RoomRegistry>,
    broadcaster: Arc<InMemoryBroadcaster>,
    handlers: ConsultationHandlers,
}

impl Clinic {
    fn new(seed: u64) -> Self {
        let registry = Arc::new(RoomRegistry::new(simulation_rng(Some(seed))));
        let broadcaster = Arc::new(InMemoryBroadcaster::new());
        let handlers = ConsultationHandlers::new(
            registry.clone(),
            broadcaster.clone(),
            ResponseTiming::default(),
        );
        Self {
            registry,
            broadcaster,
            handlers,
        }
    }

    async fn join(&self, room: &str, role: &str) -> Result<JoinRoomResult, JoinRoomError> {
        self.handlers
            .join_room
            .handle(JoinRoomCommand {
                participant_id: ParticipantId::new(),
                patient_id: Some(room.to_string()),
                role: Some(role.to_string()),
                display_name: None,
            })
            .await
    }

    async fn ask(&self, room: &RoomKey, doctor: ParticipantId, text: &str) -> String {
        let outcome = self
            .handlers
            .send_message
            .handle(SendMessageCommand {
                room_key: room.clone(),
                sender: doctor,
                text: Some(text.to_string()),
            })
            .await;
        match outcome {
            SendOutcome::RelayedWithReply { reply, .. } => reply,
            other => panic!("expected a reply to {text:?}, got {other:?}"),
        }
    }

    /// Finds a room whose generated patient satisfies `wanted`.
    async fn room_where(&self, wanted: impl Fn(&Profile) -> bool) -> RoomKey {
        for n in 0..500 {
            let key = RoomKey::new(format!("case-{n}")).unwrap();
            let state = self.registry.resolve_or_create_state(&key).await;
            if wanted(state.profile()) {
                return key;
            }
        }
        panic!("no generated patient matched");
    }
}

// =============================================================================
// Greeting
// =============================================================================

#[tokio::test(start_paused = true)]
async fn simultaneous_doctor_joins_greet_once() {
    let clinic = Clinic::new(101);

    let (first, second) = tokio::join!(clinic.join("p-1", "doctor"), clinic.join("p-1", "doctor"));
    let (first, second) = (first.unwrap(), second.unwrap());
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(first.patient, second.patient);
    assert!(first.greeted ^ second.greeted);

    let room = RoomKey::new("p-1").unwrap();
    let connected: Vec<_> = clinic
        .broadcaster
        .patient_events(&room)
        .into_iter()
        .filter(|e| e.kind == PatientEventKind::Connected)
        .collect();
    assert_eq!(connected.len(), 1);

    let messages = clinic.broadcaster.messages(&room);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, Role::Patient);
}

#[tokio::test(start_paused = true)]
async fn greeting_question_introduces_patient() {
    let clinic = Clinic::new(102);
    let joined = clinic.join("p-1", "doctor").await.unwrap();
    let profile = joined.patient.unwrap();

    let reply = clinic
        .ask(&joined.room_key, joined.participant.id, "hello doctor")
        .await;
    assert_eq!(reply, format!("Hello doctor, I'm {}.", profile.name));
    assert!(reply.contains(&profile.name));
}

// =============================================================================
// Disclosure
// =============================================================================

#[tokio::test(start_paused = true)]
async fn symptom_questions_reveal_gradually_then_summarize() {
    let clinic = Clinic::new(103);
    let room = clinic.room_where(|p| p.symptoms.len() == 3).await;
    let doctor = clinic.join(room.as_str(), "doctor").await.unwrap().participant.id;

    let first = clinic.ask(&room, doctor, "What are your symptoms?").await;
    let second = clinic.ask(&room, doctor, "what are your symptoms").await;
    let third = clinic.ask(&room, doctor, "What are your symptoms").await;

    let state = clinic.registry.resolve_or_create_state(&room).await;
    let revealed = state.disclosed_symptoms().to_vec();
    assert_eq!(revealed.len(), 3);

    assert_eq!(first, format!("I have been experiencing {}.", revealed[0]));
    assert_eq!(second, format!("I also have {}.", revealed[1]));
    assert_eq!(
        third,
        format!("The main symptoms I'm experiencing are {}.", oxford_list(&revealed))
    );

    // Exhausted: the full profile list, and nothing changes.
    let fourth = clinic.ask(&room, doctor, "Tell me about your symptoms").await;
    assert_eq!(
        fourth,
        format!("I've been experiencing {}.", oxford_list(&state.profile().symptoms))
    );
    let after = clinic.registry.resolve_or_create_state(&room).await;
    assert_eq!(after.disclosed_symptoms(), revealed.as_slice());
}

#[tokio::test(start_paused = true)]
async fn replies_arrive_after_typing_indicator() {
    let clinic = Clinic::new(104);
    let joined = clinic.join("p-1", "doctor").await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    clinic.broadcaster.clear();

    let reply = clinic
        .ask(&joined.room_key, joined.participant.id, "How old are you?")
        .await;
    tokio::time::sleep(REPLY_WAIT).await;

    let events = clinic.broadcaster.events_for(&joined.room_key);
    let kinds: Vec<&str> = events.iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec!["message", "typing", "typing", "message"]);
    match (&events[1], &events[2], &events[3]) {
        (RoomEvent::Typing(on), RoomEvent::Typing(off), RoomEvent::Message(answer)) => {
            assert!(on.is_typing);
            assert!(!off.is_typing);
            assert_eq!(answer.text, reply);
            assert_eq!(answer.role, Role::Patient);
        }
        other => panic!("unexpected events {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn temperature_question_without_fever_is_denied() {
    let clinic = Clinic::new(105);
    let room = clinic.room_where(|p| p.temperature.is_none()).await;
    let doctor = clinic.join(room.as_str(), "doctor").await.unwrap().participant.id;

    let reply = clinic.ask(&room, doctor, "What is your temperature?").await;
    assert_eq!(reply, "No, I don't have a fever.");
}

#[tokio::test(start_paused = true)]
async fn rooms_do_not_share_disclosure() {
    let clinic = Clinic::new(106);
    let a = clinic.join("p-a", "doctor").await.unwrap();
    let b = clinic.join("p-b", "doctor").await.unwrap();

    clinic
        .ask(&a.room_key, a.participant.id, "what are your symptoms")
        .await;

    let state_a = clinic.registry.resolve_or_create_state(&a.room_key).await;
    let state_b = clinic.registry.resolve_or_create_state(&b.room_key).await;
    assert_eq!(state_a.disclosed_symptoms().len(), 1);
    assert!(state_b.disclosed_symptoms().is_empty());
}

// =============================================================================
// Error paths
// =============================================================================

#[tokio::test(start_paused = true)]
async fn malformed_join_changes_nothing() {
    let clinic = Clinic::new(107);

    assert!(matches!(
        clinic.join("p-1", "nurse").await,
        Err(JoinRoomError::UnknownRole(_))
    ));
    assert!(matches!(
        clinic.join("  ", "doctor").await,
        Err(JoinRoomError::MissingField(_))
    ));

    assert_eq!(clinic.broadcaster.event_count(), 0);
    assert!(clinic.registry.active_rooms().await.is_empty());
    assert!(clinic.handlers.list_patients.handle().await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn bad_messages_are_dropped_silently() {
    let clinic = Clinic::new(108);
    let joined = clinic.join("p-1", "doctor").await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    let before = clinic.broadcaster.event_count();

    let blank = clinic
        .handlers
        .send_message
        .handle(SendMessageCommand {
            room_key: joined.room_key.clone(),
            sender: joined.participant.id,
            text: Some(" \t ".to_string()),
        })
        .await;
    let stranger = clinic
        .handlers
        .send_message
        .handle(SendMessageCommand {
            room_key: joined.room_key.clone(),
            sender: ParticipantId::new(),
            text: Some("what are your symptoms".to_string()),
        })
        .await;

    assert_eq!(blank, SendOutcome::Dropped(DropReason::BlankText));
    assert_eq!(stranger, SendOutcome::Dropped(DropReason::UnknownSender));
    tokio::time::sleep(REPLY_WAIT).await;
    assert_eq!(clinic.broadcaster.event_count(), before);

    let state = clinic.registry.resolve_or_create_state(&joined.room_key).await;
    assert!(state.disclosed_symptoms().is_empty());
}

// =============================================================================
// Leaving
// =============================================================================

#[tokio::test(start_paused = true)]
async fn patient_leaving_is_announced_and_case_is_kept() {
    let clinic = Clinic::new(109);
    let patient = clinic.join("p-1", "patient").await.unwrap();
    let doctor = clinic.join("p-1", "doctor").await.unwrap();

    let listing = clinic.handlers.list_patients.handle().await;
    assert_eq!(listing.len(), 1);
    assert!(listing[0].online);

    clinic
        .handlers
        .leave_room
        .handle(LeaveRoomCommand {
            room_key: patient.room_key.clone(),
            participant_id: patient.participant.id,
        })
        .await
        .unwrap();

    let disconnected: Vec<_> = clinic
        .broadcaster
        .patient_events(&patient.room_key)
        .into_iter()
        .filter(|e| e.kind == PatientEventKind::Disconnected)
        .collect();
    assert_eq!(disconnected.len(), 1);

    let listing = clinic.handlers.list_patients.handle().await;
    assert!(!listing[0].online);

    clinic
        .handlers
        .leave_room
        .handle(LeaveRoomCommand {
            room_key: doctor.room_key.clone(),
            participant_id: doctor.participant.id,
        })
        .await
        .unwrap();
    assert!(clinic.registry.active_rooms().await.is_empty());
    assert_eq!(clinic.handlers.list_patients.handle().await.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn reply_scheduled_before_leave_still_fires() {
    let clinic = Clinic::new(110);
    let joined = clinic.join("p-1", "doctor").await.unwrap();
    let reply = clinic
        .ask(&joined.room_key, joined.participant.id, "Do you have any allergies?")
        .await;

    clinic
        .handlers
        .leave_room
        .handle(LeaveRoomCommand {
            room_key: joined.room_key.clone(),
            participant_id: joined.participant.id,
        })
        .await
        .unwrap();
    tokio::time::sleep(REPLY_WAIT).await;

    let messages = clinic.broadcaster.messages(&joined.room_key);
    assert_eq!(messages.last().map(|m| m.text.as_str()), Some(reply.as_str()));
    assert_eq!(reply, "I don't have any known drug allergies.");
}

//! Events delivered to every participant of a room.

use serde::{Deserialize, Serialize};

use super::participant::{Participant, ParticipantSummary, Role};
use crate::domain::foundation::{RoomKey, Timestamp};
use crate::domain::patient::Profile;

/// Delivery status of a relayed message. Relayed messages are always delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Delivered,
}

/// A chat message as seen by room participants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub text: String,
    pub role: Role,
    pub display_name: String,
    pub timestamp: Timestamp,
    pub status: DeliveryStatus,
}

impl ChatMessage {
    /// Stamps a message from `role` / `display_name` with the current time.
    pub fn new(text: impl Into<String>, role: Role, display_name: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            role,
            display_name: display_name.into(),
            timestamp: Timestamp::now(),
            status: DeliveryStatus::Delivered,
        }
    }
}

/// Lifecycle notices about the simulated patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatientEventKind {
    Connected,
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientEvent {
    #[serde(rename = "type")]
    pub kind: PatientEventKind,
    pub message: String,
    pub room_key: RoomKey,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub profile: Option<Profile>,
    pub timestamp: Timestamp,
}

impl PatientEvent {
    /// Announces the room's generated patient to the arriving doctor.
    pub fn connected(room_key: RoomKey, profile: Profile) -> Self {
        Self {
            kind: PatientEventKind::Connected,
            message: format!("New patient {} connected", profile.name),
            room_key,
            profile: Some(profile),
            timestamp: Timestamp::now(),
        }
    }

    pub fn disconnected(room_key: RoomKey) -> Self {
        Self {
            kind: PatientEventKind::Disconnected,
            message: "Patient disconnected".to_string(),
            room_key,
            profile: None,
            timestamp: Timestamp::now(),
        }
    }
}

/// Typing indicator relayed to the rest of the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingIndicator {
    pub role: Role,
    pub display_name: String,
    pub is_typing: bool,
    pub room_key: RoomKey,
}

/// Everything the core asks the broadcaster to deliver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RoomEvent {
    Presence { participants: Vec<ParticipantSummary> },
    Message(ChatMessage),
    Typing(TypingIndicator),
    PatientEvent(PatientEvent),
}

impl RoomEvent {
    /// Presence update listing the current roster.
    pub fn presence(roster: &[Participant]) -> Self {
        RoomEvent::Presence {
            participants: roster.iter().map(Participant::summary).collect(),
        }
    }

    pub fn message(text: impl Into<String>, role: Role, display_name: impl Into<String>) -> Self {
        RoomEvent::Message(ChatMessage::new(text, role, display_name))
    }

    pub fn typing(
        room_key: &RoomKey,
        role: Role,
        display_name: impl Into<String>,
        is_typing: bool,
    ) -> Self {
        RoomEvent::Typing(TypingIndicator {
            role,
            display_name: display_name.into(),
            is_typing,
            room_key: room_key.clone(),
        })
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RoomEvent::Presence { .. } => "presence",
            RoomEvent::Message(_) => "message",
            RoomEvent::Typing(_) => "typing",
            RoomEvent::PatientEvent(_) => "patient_event",
        }
    }
}

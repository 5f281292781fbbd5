//! WebSocket message types for consultation rooms.
//!
//! Defines the protocol between server and connected clients:
//! - Client → Server: join, message, typing, patient directory requests, pings
//! - Server → Client: join confirmation, room events, directory, errors, pongs
//!
//! Both directions are JSON objects tagged by an `event` field.

use serde::{Deserialize, Serialize};

use crate::domain::consultation::{
    ChatMessage, Participant, ParticipantSummary, PatientEvent, PatientListing, Role, RoomEvent,
    TypingIndicator,
};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::patient::Profile;

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ServerMessage {
    /// The connection joined a room.
    Joined(JoinedMessage),

    /// Room roster changed.
    Presence(PresenceMessage),

    /// Chat message from a participant or the simulated patient.
    Message(ChatMessage),

    /// Someone in the room started or stopped typing.
    Typing(TypingIndicator),

    /// Simulated patient connected or a patient disconnected.
    PatientEvent(PatientEvent),

    /// Patient directory.
    PatientsList(PatientsListMessage),

    /// Error occurred.
    Error(ErrorMessage),

    /// Heartbeat response.
    Pong(PongMessage),
}

/// Sent to the joining connection only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedMessage {
    pub room_key: String,
    pub participant_id: String,
    pub role: Role,
    pub display_name: String,
    pub participants: Vec<ParticipantSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient: Option<Profile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PresenceMessage {
    pub participants: Vec<ParticipantSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientsListMessage {
    pub patients: Vec<PatientListing>,
}

/// Error message sent to client.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorMessage {
    pub code: String,
    pub message: String,
    pub timestamp: String,
}

/// Heartbeat response.
#[derive(Debug, Clone, Serialize)]
pub struct PongMessage {
    pub timestamp: String,
}

impl ServerMessage {
    pub fn joined(
        participant: &Participant,
        room_key: &str,
        roster: &[Participant],
        patient: Option<Profile>,
    ) -> Self {
        ServerMessage::Joined(JoinedMessage {
            room_key: room_key.to_string(),
            participant_id: participant.id.to_string(),
            role: participant.role,
            display_name: participant.display_name.clone(),
            participants: roster.iter().map(Participant::summary).collect(),
            patient,
        })
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMessage::Error(ErrorMessage {
            code: code.to_string(),
            message: message.into(),
            timestamp: Timestamp::now().as_datetime().to_rfc3339(),
        })
    }

    pub fn pong() -> Self {
        ServerMessage::Pong(PongMessage {
            timestamp: Timestamp::now().as_datetime().to_rfc3339(),
        })
    }
}

impl From<RoomEvent> for ServerMessage {
    fn from(event: RoomEvent) -> Self {
        match event {
            RoomEvent::Presence { participants } => {
                ServerMessage::Presence(PresenceMessage { participants })
            }
            RoomEvent::Message(message) => ServerMessage::Message(message),
            RoomEvent::Typing(typing) => ServerMessage::Typing(typing),
            RoomEvent::PatientEvent(event) => ServerMessage::PatientEvent(event),
        }
    }
}

impl From<DomainError> for ServerMessage {
    fn from(err: DomainError) -> Self {
        ServerMessage::error(err.code, err.message)
    }
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Enter a patient's room.
    Join(JoinRequest),

    /// Say something in the joined room.
    Message(MessageRequest),

    /// Typing indicator for the joined room.
    Typing(TypingRequest),

    /// Request the patient directory.
    GetPatients,

    /// Heartbeat request.
    Ping,
}

/// Fields are optional so that incomplete joins reach validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingRequest {
    #[serde(default)]
    pub is_typing: bool,
}

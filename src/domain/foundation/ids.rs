//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Stable key of a conversation room.
///
/// One room exists per simulated patient identity, so the key is the
/// `patientId` supplied by clients when they join.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomKey(String);

impl RoomKey {
    /// Creates a room key, rejecting blank identifiers.
    pub fn new(patient_id: impl Into<String>) -> Result<Self, ValidationError> {
        let patient_id = patient_id.into();
        let trimmed = patient_id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("patientId"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the patient identifier this room is keyed by.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the channel name used for this room on the wire.
    pub fn channel_name(&self) -> String {
        format!("chat:{}", self.0)
    }
}

impl fmt::Display for RoomKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier for one connected participant.
///
/// Generated server-side when a connection joins a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(Uuid);

impl ParticipantId {
    /// Creates a new random ParticipantId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ParticipantId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ParticipantId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

//! Room participants and their roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{ParticipantId, ValidationError};

/// Which side of the consultation a participant is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Err(ValidationError::empty_field("role")),
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("expected 'doctor' or 'patient', got '{}'", other),
            )),
        }
    }
}

/// A connection that has joined a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub role: Role,
    pub display_name: String,
}

impl Participant {
    /// Creates a participant; a blank display name falls back to the role name.
    pub fn new(id: ParticipantId, role: Role, display_name: Option<String>) -> Self {
        let display_name = display_name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| role.to_string());
        Self {
            id,
            role,
            display_name,
        }
    }

    /// Public view of the participant, as sent in presence updates.
    pub fn summary(&self) -> ParticipantSummary {
        ParticipantSummary {
            role: self.role,
            display_name: self.display_name.clone(),
        }
    }
}

/// Role and display name of a participant, without the connection identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSummary {
    pub role: Role,
    pub display_name: String,
}

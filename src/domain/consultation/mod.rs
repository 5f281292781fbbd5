//! Consultation rooms and the simulated patient's conversation.
//!
//! - `participant` - roles and room members
//! - `state` - per-room profile and disclosure progress
//! - `intent` - ordered rule table classifying doctor utterances
//! - `reply` - templated patient replies
//! - `events` - what gets broadcast to a room
//! - `registry` - the owner of every room

mod events;
mod intent;
mod participant;
mod registry;
mod reply;
mod state;

pub use events::{
    ChatMessage, DeliveryStatus, PatientEvent, PatientEventKind, RoomEvent, TypingIndicator,
};
pub use intent::{fallback_for, Intent, IntentClassifier, IntentRule};
pub use participant::{Participant, ParticipantSummary, Role};
pub use registry::{PatientListing, RoomRegistry};
pub use reply::{oxford_list, ReplyEngine};
pub use state::ConversationState;

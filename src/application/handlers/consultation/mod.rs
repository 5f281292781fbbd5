//! Consultation command and query handlers.

mod join_room;
mod leave_room;
mod list_patients;
mod relay_typing;
mod send_message;
mod timing;

use std::sync::Arc;

use crate::domain::consultation::RoomRegistry;
use crate::ports::RoomBroadcaster;

pub use join_room::{JoinRoomCommand, JoinRoomError, JoinRoomHandler, JoinRoomResult};
pub use leave_room::{LeaveRoomCommand, LeaveRoomHandler, LeaveRoomResult};
pub use list_patients::ListPatientsHandler;
pub use relay_typing::{RelayTypingCommand, RelayTypingHandler};
pub use send_message::{DropReason, SendMessageCommand, SendMessageHandler, SendOutcome};
pub use timing::ResponseTiming;

/// Every consultation handler, wired to the same registry and broadcaster.
pub struct ConsultationHandlers {
    pub join_room: JoinRoomHandler,
    pub send_message: SendMessageHandler,
    pub relay_typing: RelayTypingHandler,
    pub leave_room: LeaveRoomHandler,
    pub list_patients: ListPatientsHandler,
}

impl ConsultationHandlers {
    pub fn new(
        registry: Arc<RoomRegistry>,
        broadcaster: Arc<dyn RoomBroadcaster>,
        timing: ResponseTiming,
    ) -> Self {
        Self {
            join_room: JoinRoomHandler::new(registry.clone(), broadcaster.clone(), timing),
            send_message: SendMessageHandler::new(registry.clone(), broadcaster.clone(), timing),
            relay_typing: RelayTypingHandler::new(registry.clone(), broadcaster.clone()),
            leave_room: LeaveRoomHandler::new(registry.clone(), broadcaster),
            list_patients: ListPatientsHandler::new(registry),
        }
    }
}

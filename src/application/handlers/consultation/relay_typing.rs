//! RelayTypingHandler - Forwards typing indicators to the rest of the room.

use std::sync::Arc;

use crate::domain::consultation::{RoomEvent, RoomRegistry};
use crate::domain::foundation::{ParticipantId, RoomKey};
use crate::ports::RoomBroadcaster;

#[derive(Debug, Clone)]
pub struct RelayTypingCommand {
    pub room_key: RoomKey,
    pub sender: ParticipantId,
    pub is_typing: bool,
}

/// Handler for typing indicators. The sender never sees its own indicator.
pub struct RelayTypingHandler {
    registry: Arc<RoomRegistry>,
    broadcaster: Arc<dyn RoomBroadcaster>,
}

impl RelayTypingHandler {
    pub fn new(registry: Arc<RoomRegistry>, broadcaster: Arc<dyn RoomBroadcaster>) -> Self {
        Self {
            registry,
            broadcaster,
        }
    }

    /// Returns whether the indicator was relayed; unknown senders are ignored.
    pub async fn handle(&self, cmd: RelayTypingCommand) -> bool {
        let Some(sender) = self.registry.participant(&cmd.room_key, &cmd.sender).await else {
            return false;
        };
        let event = RoomEvent::typing(
            &cmd.room_key,
            sender.role,
            sender.display_name,
            cmd.is_typing,
        );
        self.broadcaster
            .broadcast_except(&cmd.room_key, &cmd.sender, event)
            .await;
        true
    }
}

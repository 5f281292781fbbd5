//! SendMessageHandler - Relays a chat message and drives the simulated reply.

use std::sync::Arc;
use std::time::Duration;

use super::timing::{broadcast_after, ResponseTiming};
use crate::domain::consultation::{
    Intent, IntentClassifier, ReplyEngine, Role, RoomEvent, RoomRegistry,
};
use crate::domain::foundation::{ParticipantId, RoomKey};
use crate::ports::RoomBroadcaster;

/// Command to send a message into a room.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub room_key: RoomKey,
    pub sender: ParticipantId,
    pub text: Option<String>,
}

/// Why a message was not relayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    BlankText,
    UnknownSender,
}

/// What happened to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was broadcast and nothing changed.
    Dropped(DropReason),
    /// Echoed to the room; no simulated reply.
    Relayed,
    /// Echoed to the room and a patient reply is scheduled.
    RelayedWithReply {
        intent: Intent,
        reply: String,
        delay: Duration,
    },
}

/// Handler for room messages.
pub struct SendMessageHandler {
    registry: Arc<RoomRegistry>,
    broadcaster: Arc<dyn RoomBroadcaster>,
    timing: ResponseTiming,
    classifier: IntentClassifier,
    engine: ReplyEngine,
}

impl SendMessageHandler {
    pub fn new(
        registry: Arc<RoomRegistry>,
        broadcaster: Arc<dyn RoomBroadcaster>,
        timing: ResponseTiming,
    ) -> Self {
        Self {
            registry,
            broadcaster,
            timing,
            classifier: IntentClassifier::new(),
            engine: ReplyEngine::new(),
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> SendOutcome {
        let text = cmd.text.as_deref().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            tracing::debug!(room = %cmd.room_key, sender = %cmd.sender, "Dropped blank message");
            return SendOutcome::Dropped(DropReason::BlankText);
        }

        let Some(sender) = self.registry.participant(&cmd.room_key, &cmd.sender).await else {
            tracing::debug!(
                room = %cmd.room_key,
                sender = %cmd.sender,
                "Dropped message from unknown sender"
            );
            return SendOutcome::Dropped(DropReason::UnknownSender);
        };

        // 1. Echo to the whole room, sender included
        self.broadcaster
            .broadcast(
                &cmd.room_key,
                RoomEvent::message(text, sender.role, sender.display_name.clone()),
            )
            .await;

        if sender.role != Role::Doctor {
            return SendOutcome::Relayed;
        }

        // 2. Classify and compute the reply under the room's lock
        let intent = self.classifier.classify(text);
        tracing::debug!(room = %cmd.room_key, ?intent, "Classified doctor message");

        let (reply, delay, patient_name) = self
            .registry
            .with_conversation(&cmd.room_key, |state, rng| {
                let reply = self.engine.reply(intent, state, text, rng);
                let delay = self.timing.reply_delay(rng);
                (reply, delay, state.profile().name.clone())
            })
            .await;

        // 3. Patient "types", then answers
        self.broadcaster
            .broadcast(
                &cmd.room_key,
                RoomEvent::typing(&cmd.room_key, Role::Patient, patient_name.clone(), true),
            )
            .await;
        broadcast_after(
            self.broadcaster.clone(),
            cmd.room_key.clone(),
            delay,
            vec![
                RoomEvent::typing(&cmd.room_key, Role::Patient, patient_name.clone(), false),
                RoomEvent::message(reply.clone(), Role::Patient, patient_name),
            ],
        );

        SendOutcome::RelayedWithReply {
            intent,
            reply,
            delay,
        }
    }
}

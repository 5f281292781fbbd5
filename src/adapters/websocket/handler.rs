//! WebSocket upgrade handler for consultation connections.
//!
//! Manages the connection lifecycle:
//! 1. Upgrade to WebSocket
//! 2. Wait for a `join` naming the patient room and role
//! 3. Relay room events to the client and client frames to the handlers
//! 4. Leave the room on disconnect

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::application::{
    ConsultationHandlers, JoinRoomCommand, LeaveRoomCommand, RelayTypingCommand,
    SendMessageCommand,
};
use crate::domain::foundation::{DomainError, ErrorCode, ParticipantId, RoomKey};

use super::messages::{ClientMessage, JoinRequest, PatientsListMessage, ServerMessage};
use super::rooms::{Outbound, RoomManager};

/// Frames buffered per connection before the writer applies backpressure.
const OUTBOUND_BUFFER: usize = 64;

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Room manager for per-room fan-out.
    pub room_manager: Arc<RoomManager>,
    pub handlers: Arc<ConsultationHandlers>,
}

impl WebSocketState {
    pub fn new(room_manager: Arc<RoomManager>, handlers: Arc<ConsultationHandlers>) -> Self {
        Self {
            room_manager,
            handlers,
        }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Room the connection joined and the task relaying its events.
struct Membership {
    room_key: RoomKey,
    forwarder: JoinHandle<()>,
}

/// Per-connection context.
struct Connection {
    id: ParticipantId,
    state: WebSocketState,
    outbound: mpsc::Sender<ServerMessage>,
    membership: Option<Membership>,
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection. All frames to the client go
/// through one writer task so room events and direct replies never
/// interleave mid-frame.
async fn handle_socket(socket: WebSocket, state: WebSocketState) {
    let (sink, mut stream) = socket.split();
    let (outbound, outbound_rx) = mpsc::channel(OUTBOUND_BUFFER);
    let id = ParticipantId::new();

    let mut writer = tokio::spawn(write_frames(sink, outbound_rx, id));
    let mut conn = Connection {
        id,
        state,
        outbound,
        membership: None,
    };
    tracing::debug!(connection = %id, "WebSocket connected");

    loop {
        tokio::select! {
            _ = &mut writer => {
                // Socket no longer writable
                break;
            }
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => conn.on_text(&text).await,
                Some(Ok(Message::Binary(_))) => {
                    tracing::warn!(connection = %id, "Received unsupported binary message");
                }
                Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => {
                    // WebSocket protocol ping/pong - handled automatically by axum
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::debug!(connection = %id, "Client closed connection");
                    break;
                }
                Some(Err(e)) => {
                    tracing::debug!(connection = %id, "Receive error: {}", e);
                    break;
                }
            }
        }
    }

    conn.disconnect().await;
    writer.abort();
}

impl Connection {
    async fn on_text(&mut self, text: &str) {
        let message = match serde_json::from_str::<ClientMessage>(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(connection = %self.id, "Unparseable frame: {}", e);
                self.reply(ServerMessage::error(
                    ErrorCode::InvalidMessage,
                    "Unrecognized message",
                ))
                .await;
                return;
            }
        };

        match message {
            ClientMessage::Join(request) => self.on_join(request).await,
            ClientMessage::Message(request) => {
                let Some(room_key) = self.joined_room() else {
                    self.reply(not_joined()).await;
                    return;
                };
                self.state
                    .handlers
                    .send_message
                    .handle(SendMessageCommand {
                        room_key,
                        sender: self.id,
                        text: request.text,
                    })
                    .await;
            }
            ClientMessage::Typing(request) => {
                let Some(room_key) = self.joined_room() else {
                    tracing::debug!(connection = %self.id, "Ignoring typing before join");
                    return;
                };
                self.state
                    .handlers
                    .relay_typing
                    .handle(RelayTypingCommand {
                        room_key,
                        sender: self.id,
                        is_typing: request.is_typing,
                    })
                    .await;
            }
            ClientMessage::GetPatients => {
                let patients = self.state.handlers.list_patients.handle().await;
                self.reply(ServerMessage::PatientsList(PatientsListMessage { patients }))
                    .await;
            }
            ClientMessage::Ping => self.reply(ServerMessage::pong()).await,
        }
    }

    async fn on_join(&mut self, request: JoinRequest) {
        if self.membership.is_some() {
            self.reply(ServerMessage::error(
                ErrorCode::AlreadyJoined,
                "Connection already joined a room",
            ))
            .await;
            return;
        }

        // Subscribe before the handler broadcasts so the joiner sees its own
        // presence update and the patient announcement.
        let candidate = request
            .patient_id
            .as_deref()
            .and_then(|id| RoomKey::new(id).ok());
        let mut subscription = match &candidate {
            Some(key) => Some(self.state.room_manager.join(key, self.id).await),
            None => None,
        };

        let cmd = JoinRoomCommand {
            participant_id: self.id,
            patient_id: request.patient_id,
            role: request.role,
            display_name: request.display_name,
        };

        match self.state.handlers.join_room.handle(cmd).await {
            Ok(result) => {
                let rx = match subscription.take() {
                    Some(rx) => rx,
                    None => self.state.room_manager.join(&result.room_key, self.id).await,
                };
                self.reply(ServerMessage::joined(
                    &result.participant,
                    result.room_key.as_str(),
                    &result.roster,
                    result.patient,
                ))
                .await;
                let forwarder = spawn_forwarder(rx, self.id, self.outbound.clone());
                self.membership = Some(Membership {
                    room_key: result.room_key,
                    forwarder,
                });
            }
            Err(err) => {
                tracing::debug!(connection = %self.id, "Rejected join: {}", err);
                if subscription.take().is_some() {
                    self.state.room_manager.leave(&self.id).await;
                }
                self.reply(DomainError::from(err).into()).await;
            }
        }
    }

    fn joined_room(&self) -> Option<RoomKey> {
        self.membership.as_ref().map(|m| m.room_key.clone())
    }

    async fn reply(&self, message: ServerMessage) {
        if self.outbound.send(message).await.is_err() {
            tracing::debug!(connection = %self.id, "Writer gone, dropping reply");
        }
    }

    async fn disconnect(self) {
        let Some(membership) = self.membership else {
            tracing::debug!(connection = %self.id, "WebSocket closed before joining");
            return;
        };

        membership.forwarder.abort();
        // Wait for the receiver to drop so an empty room can be cleaned up
        let _ = membership.forwarder.await;
        self.state.room_manager.leave(&self.id).await;
        let left = self
            .state
            .handlers
            .leave_room
            .handle(LeaveRoomCommand {
                room_key: membership.room_key,
                participant_id: self.id,
            })
            .await;
        if left.is_none() {
            tracing::debug!(connection = %self.id, "Participant already gone from room");
        }
    }
}

fn not_joined() -> ServerMessage {
    ServerMessage::error(ErrorCode::NotJoined, "Join a room before sending messages")
}

/// Relays room events to one connection, skipping events excluded for it.
fn spawn_forwarder(
    mut rx: broadcast::Receiver<Outbound>,
    me: ParticipantId,
    outbound: mpsc::Sender<ServerMessage>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(item) => {
                    if !item.is_for(&me) {
                        continue;
                    }
                    if outbound.send(item.event.into()).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(connection = %me, missed, "Connection lagged behind room");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

/// Drains the outbound queue into the socket.
async fn write_frames(
    mut sink: SplitSink<WebSocket, Message>,
    mut frames: mpsc::Receiver<ServerMessage>,
    id: ParticipantId,
) {
    while let Some(frame) = frames.recv().await {
        if let Err(e) = send_message(&mut sink, &frame).await {
            tracing::debug!(connection = %id, "Send error, closing connection: {}", e);
            break;
        }
    }
}

/// Send a JSON message over the WebSocket.
async fn send_message(
    sink: &mut SplitSink<WebSocket, Message>,
    msg: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(msg).map_err(axum::Error::new)?;
    sink.send(Message::Text(json)).await
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router() -> Router<WebSocketState> {
    Router::new().route("/ws", get(ws_handler))
}

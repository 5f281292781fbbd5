//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod consultation;

pub use consultation::{
    ConsultationHandlers, DropReason, JoinRoomCommand, JoinRoomError, JoinRoomHandler,
    JoinRoomResult, LeaveRoomCommand, LeaveRoomHandler, LeaveRoomResult, ListPatientsHandler,
    RelayTypingCommand, RelayTypingHandler, ResponseTiming, SendMessageCommand,
    SendMessageHandler, SendOutcome,
};

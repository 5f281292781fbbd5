//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Following CQRS, it separates command handlers (write) from query handlers (read).

pub mod handlers;

pub use handlers::{
    ConsultationHandlers, DropReason, JoinRoomCommand, JoinRoomError, JoinRoomHandler,
    JoinRoomResult, LeaveRoomCommand, LeaveRoomHandler, LeaveRoomResult, ListPatientsHandler,
    RelayTypingCommand, RelayTypingHandler, ResponseTiming, SendMessageCommand,
    SendMessageHandler, SendOutcome,
};

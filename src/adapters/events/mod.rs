//! Broadcaster adapters.
//!
//! - `InMemoryBroadcaster` - Records room events in-process for testing

mod in_memory;

pub use in_memory::{Delivery, InMemoryBroadcaster};

//! Consult Relay - Real-time doctor/patient consultation rooms
//!
//! Relays chat between participants grouped by patient, and plays the
//! patient side with a simulated case: a generated profile, an ordered
//! intent classifier, and templated replies that reveal symptoms gradually.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

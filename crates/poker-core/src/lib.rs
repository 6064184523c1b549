//! Core types shared by every layer of the poker table client.
//!
//! Nothing in here knows about a UI framework or a concrete HTTP stack.

pub mod protocol;
pub mod seats;
pub mod transport;

//! Client-side session core for the poker table.
//!
//! Pure state machines (login, game creation, table, navigation) plus the
//! HTTP gateway and a controller that wires them to browser history. No UI
//! framework dependency.

pub mod client_controller;
pub mod config;
pub mod creation;
pub mod flow;
pub mod gateway;
pub mod login;
pub mod navigation;
pub mod session;
pub mod table;

#[cfg(feature = "web")]
pub mod http_transport;

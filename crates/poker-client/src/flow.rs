//! Shared shape of the request/response flows (login, game creation).

use poker_core::protocol::GameSnapshot;

use crate::gateway::Command;

/// What a flow asks of its owner after handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEffect {
    /// Perform this network call and feed the completion back.
    Send(Command),
    /// The passphrase was accepted for an existing game.
    LoggedIn {
        snapshot: GameSnapshot,
        passphrase: String,
    },
    /// A new game exists; the creator holds its passphrase.
    Created {
        snapshot: GameSnapshot,
        passphrase: String,
    },
}

/// New flow state plus at most one effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<S> {
    pub state: S,
    pub effect: Option<FlowEffect>,
}

impl<S> Step<S> {
    pub fn stay(state: S) -> Self {
        Self {
            state,
            effect: None,
        }
    }

    pub fn with(state: S, effect: FlowEffect) -> Self {
        Self {
            state,
            effect: Some(effect),
        }
    }
}

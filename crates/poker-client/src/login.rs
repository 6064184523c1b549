//! Passphrase login for an existing game.

use poker_core::protocol::GameId;
use tracing::debug;

use crate::flow::{FlowEffect, Step};
use crate::gateway::{Command, Completion, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginEvent {
    PassphraseChanged(String),
    /// Submit the current input; `request` is the id to send it under.
    Submit { request: RequestId },
    Completed(Completion),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFlow {
    pub passphrase: String,
    /// Last failure, shown inline. Empty when there is none.
    pub error: String,
    pub pending: Option<RequestId>,
}

impl LoginFlow {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn update(mut self, game_id: GameId, event: LoginEvent) -> Step<Self> {
        match event {
            LoginEvent::PassphraseChanged(text) => {
                self.passphrase = text;
                Step::stay(self)
            }
            LoginEvent::Submit { request } => {
                if self.is_pending() {
                    return Step::stay(self);
                }
                self.pending = Some(request);
                let command = Command::FetchStatus {
                    request,
                    game_id,
                    passphrase: self.passphrase.clone(),
                };
                Step::with(self, FlowEffect::Send(command))
            }
            LoginEvent::Completed(Completion { request, result }) => {
                if self.pending != Some(request) {
                    debug!(%request, "dropping stale login response");
                    return Step::stay(self);
                }
                self.pending = None;
                match result {
                    Ok(snapshot) => {
                        let passphrase = self.passphrase.clone();
                        self.error.clear();
                        Step::with(
                            self,
                            FlowEffect::LoggedIn {
                                snapshot,
                                passphrase,
                            },
                        )
                    }
                    Err(err) => {
                        self.error = err.to_string();
                        Step::stay(self)
                    }
                }
            }
        }
    }
}

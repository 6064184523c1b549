//! New-game form: passphrase, starter chips and blind size.

use poker_core::protocol::parse_whole_number;
use tracing::debug;

use crate::flow::{FlowEffect, Step};
use crate::gateway::{Command, Completion, RequestId};

// Zero passes the check despite the wording; the server rejects it.
pub const STARTER_CHIPS_INVALID: &str = "Starter Chips must be a positive integer";
pub const BLIND_SIZE_INVALID: &str = "Blind Size must be a positive integer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreationEvent {
    PassphraseChanged(String),
    StarterChipsChanged(String),
    BlindSizeChanged(String),
    Submit { request: RequestId },
    Completed(Completion),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationFlow {
    pub passphrase: String,
    pub starter_chips: String,
    pub blind_size: String,
    pub error: String,
    pub pending: Option<RequestId>,
}

impl CreationFlow {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Parsed `(starter_chips, blind_size)`, or the first message to show.
    pub fn validate(&self) -> Result<(u64, u64), &'static str> {
        let starter_chips = parse_whole_number(&self.starter_chips).ok_or(STARTER_CHIPS_INVALID)?;
        let blind_size = parse_whole_number(&self.blind_size).ok_or(BLIND_SIZE_INVALID)?;
        Ok((starter_chips, blind_size))
    }

    pub fn update(mut self, event: CreationEvent) -> Step<Self> {
        match event {
            CreationEvent::PassphraseChanged(text) => {
                self.passphrase = text;
                Step::stay(self)
            }
            CreationEvent::StarterChipsChanged(text) => {
                self.starter_chips = text;
                Step::stay(self)
            }
            CreationEvent::BlindSizeChanged(text) => {
                self.blind_size = text;
                Step::stay(self)
            }
            CreationEvent::Submit { request } => {
                if self.is_pending() {
                    return Step::stay(self);
                }
                let (starter_chips, blind_size) = match self.validate() {
                    Ok(values) => values,
                    Err(message) => {
                        self.error = message.to_string();
                        return Step::stay(self);
                    }
                };
                self.pending = Some(request);
                let command = Command::CreateGame {
                    request,
                    passphrase: self.passphrase.clone(),
                    starter_chips,
                    blind_size,
                };
                Step::with(self, FlowEffect::Send(command))
            }
            CreationEvent::Completed(Completion { request, result }) => {
                if self.pending != Some(request) {
                    debug!(%request, "dropping stale create response");
                    return Step::stay(self);
                }
                self.pending = None;
                match result {
                    Ok(snapshot) => {
                        let passphrase = self.passphrase.clone();
                        self.error.clear();
                        Step::with(
                            self,
                            FlowEffect::Created {
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

//! Navigation / session state machine.
//!
//! Owns which page is showing (landing, game creation, table), keeps the
//! browser history in step with it, and routes network completions to the
//! flow that asked for them.
//!
//! [`Session::update`] is a pure reducer: it returns the next session plus
//! a list of [`Effect`]s for the caller to carry out. History effects go to
//! a [`NavigationPort`](crate::navigation::NavigationPort); `Send` effects go
//! to the [`Gateway`](crate::gateway::Gateway), whose [`Completion`] comes
//! back as [`Event::Completed`].

use poker_core::protocol::GameId;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::creation::{CreationEvent, CreationFlow};
use crate::flow::{FlowEffect, Step};
use crate::gateway::{Command, Completion, RequestId};
use crate::login::LoginEvent;
use crate::navigation::{HistoryEntry, Location, PopEvent, Route};
use crate::table::{TableEvent, TableStatus, TableView};

/// Errors that replace the whole page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FatalError {
    /// The history held a state this client does not understand.
    #[error("Unrecognised page state: {0}")]
    Configuration(String),
    /// A passphrase that was already accepted stopped working.
    #[error("{0}")]
    Inconsistent(String),
}

/// The three pages, without their contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Creating,
    InGame,
}

/// The page being shown, with its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Landing,
    Creating(CreationFlow),
    Table(TableView),
    /// Unreadable history state. Terminal.
    Broken(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// "Create Game" on the landing page.
    CreateGameClicked,
    CreationPassphrase(String),
    CreationStarterChips(String),
    CreationBlindSize(String),
    SubmitCreation,
    LoginPassphrase(String),
    SubmitLogin,
    Completed(Completion),
    HistoryPopped(PopEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    PushHistory(HistoryEntry),
    ReplaceHistory(HistoryEntry),
    Send(Command),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    view: View,
    next_request: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            view: View::Landing,
            next_request: 1,
        }
    }
}

impl Session {
    /// Build the session for the page the browser opened on.
    ///
    /// The URL is normalised with a history replace, never a push.
    pub fn start(location: &Location) -> (Self, Vec<Effect>) {
        let entry = HistoryEntry::for_route(Route::from_location(location));
        info!(path = %location.path, url = %entry.url(), "starting session");

        let mut session = Session::default();
        let mut effects = vec![Effect::ReplaceHistory(entry.clone())];
        session.mount(entry, &mut effects);
        (session, effects)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn page(&self) -> Option<Page> {
        match self.view {
            View::Landing => Some(Page::Landing),
            View::Creating(_) => Some(Page::Creating),
            View::Table(_) => Some(Page::InGame),
            View::Broken(_) => None,
        }
    }

    /// Browser tab title for the current page.
    pub fn title(&self) -> String {
        match (self.page(), self.game_id()) {
            (Some(Page::InGame), Some(game_id)) => format!("Poker | Game #{game_id}"),
            (Some(Page::Creating), _) => "Poker | New Game".to_string(),
            (Some(Page::Landing), _) | (Some(Page::InGame), None) => "Poker".to_string(),
            (None, _) => "Poker | Error".to_string(),
        }
    }

    pub fn game_id(&self) -> Option<GameId> {
        match &self.view {
            View::Table(table) => Some(table.game_id),
            _ => None,
        }
    }

    /// Passphrase held for the current game; empty when not authenticated.
    pub fn passphrase(&self) -> &str {
        match &self.view {
            View::Table(table) => &table.passphrase,
            _ => "",
        }
    }

    /// The error that replaces the whole page, if any.
    pub fn fatal(&self) -> Option<FatalError> {
        match &self.view {
            View::Broken(reason) => Some(FatalError::Configuration(reason.clone())),
            View::Table(TableView {
                status: TableStatus::Failed(message),
                ..
            }) => Some(FatalError::Inconsistent(message.clone())),
            _ => None,
        }
    }

    pub fn update(mut self, event: Event) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();
        let view = std::mem::replace(&mut self.view, View::Landing);

        self.view = match (view, event) {
            (View::Broken(reason), _) => View::Broken(reason),

            (_, Event::HistoryPopped(pop)) => {
                self.restore(pop, &mut effects);
                return (self, effects);
            }

            (View::Landing, Event::CreateGameClicked) => {
                info!("opening game creation");
                effects.push(Effect::PushHistory(HistoryEntry::Creating));
                View::Creating(CreationFlow::default())
            }

            (View::Creating(flow), event) => {
                let event = match event {
                    Event::CreationPassphrase(text) => CreationEvent::PassphraseChanged(text),
                    Event::CreationStarterChips(text) => CreationEvent::StarterChipsChanged(text),
                    Event::CreationBlindSize(text) => CreationEvent::BlindSizeChanged(text),
                    Event::SubmitCreation => CreationEvent::Submit {
                        request: self.next_request_id(),
                    },
                    Event::Completed(completion) => CreationEvent::Completed(completion),
                    other => {
                        debug!(?other, "event ignored on creation page");
                        self.view = View::Creating(flow);
                        return (self, effects);
                    }
                };
                self.after_creation(flow.update(event), &mut effects)
            }

            (View::Table(table), event) => {
                let event = match event {
                    Event::LoginPassphrase(text) => {
                        TableEvent::Login(LoginEvent::PassphraseChanged(text))
                    }
                    Event::SubmitLogin => TableEvent::Login(LoginEvent::Submit {
                        request: self.next_request_id(),
                    }),
                    Event::Completed(completion) => TableEvent::Completed(completion),
                    other => {
                        debug!(?other, "event ignored on table page");
                        self.view = View::Table(table);
                        return (self, effects);
                    }
                };
                self.after_table(table.update(event), &mut effects)
            }

            (view, Event::Completed(completion)) => {
                debug!(request = %completion.request, "dropping response for a page no longer shown");
                view
            }

            (view, other) => {
                debug!(?other, "event ignored");
                view
            }
        };
        (self, effects)
    }

    fn next_request_id(&mut self) -> RequestId {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        id
    }

    /// Show the page an entry describes. Never touches history.
    fn mount(&mut self, entry: HistoryEntry, effects: &mut Vec<Effect>) {
        self.view = match entry {
            HistoryEntry::Landing => View::Landing,
            HistoryEntry::Creating => View::Creating(CreationFlow::default()),
            HistoryEntry::InGame {
                game_id,
                passphrase,
                snapshot,
            } => {
                let request = self.next_request_id();
                let step = TableView::mount(game_id, passphrase, snapshot, request);
                self.after_table(step, effects)
            }
        };
    }

    fn restore(&mut self, pop: PopEvent, effects: &mut Vec<Effect>) {
        match pop {
            PopEvent::Restored(entry) => {
                info!(url = %entry.url(), "history restored");
                self.mount(entry, effects);
            }
            PopEvent::Bare(location) => {
                let entry = HistoryEntry::for_route(Route::from_location(&location));
                info!(url = %entry.url(), "history position without state");
                effects.push(Effect::ReplaceHistory(entry.clone()));
                self.mount(entry, effects);
            }
            PopEvent::Unreadable(reason) => {
                warn!(%reason, "unreadable history state");
                self.view = View::Broken(reason);
            }
        }
    }

    fn after_creation(&mut self, step: Step<CreationFlow>, effects: &mut Vec<Effect>) -> View {
        match step.effect {
            Some(FlowEffect::Send(command)) => {
                effects.push(Effect::Send(command));
                View::Creating(step.state)
            }
            Some(FlowEffect::Created {
                snapshot,
                passphrase,
            }) => {
                info!(game_id = snapshot.game_id, "game created");
                effects.push(Effect::PushHistory(HistoryEntry::InGame {
                    game_id: snapshot.game_id,
                    passphrase: passphrase.clone(),
                    snapshot: None,
                }));
                let request = self.next_request_id();
                self.after_table(TableView::mount_created(snapshot, passphrase, request), effects)
            }
            Some(FlowEffect::LoggedIn { .. }) | None => View::Creating(step.state),
        }
    }

    fn after_table(&mut self, step: Step<TableView>, effects: &mut Vec<Effect>) -> View {
        match step.effect {
            Some(FlowEffect::Send(command)) => effects.push(Effect::Send(command)),
            Some(FlowEffect::LoggedIn {
                snapshot,
                passphrase,
            }) => {
                info!(game_id = step.state.game_id, "table authenticated");
                effects.push(Effect::ReplaceHistory(HistoryEntry::InGame {
                    game_id: step.state.game_id,
                    passphrase,
                    snapshot: Some(snapshot),
                }));
            }
            Some(FlowEffect::Created { .. }) | None => {}
        }
        View::Table(step.state)
    }
}

//! Framework-agnostic client controller.
//!
//! Owns a [`NavigationPort`] and a [`Session`], providing the shared
//! dispatch logic every frontend needs:
//!
//! - Feeding [`Event`]s through the session reducer.
//! - Writing the resulting history effects to the port.
//! - Handing network [`Command`]s back so the frontend can run them on its
//!   own executor and report each [`Completion`] via
//!   [`ClientController::complete`].
//!
//! Frontends only need to:
//! 1. Call [`ClientController::start`] once the page has loaded.
//! 2. Call [`ClientController::dispatch`] for every user action and every
//!    history pop.
//! 3. Execute returned commands through a
//!    [`Gateway`](crate::gateway::Gateway), concurrently if they like.

use tracing::warn;

use crate::gateway::{Command, Completion};
use crate::navigation::NavigationPort;
use crate::session::{Effect, Event, Session};

pub struct ClientController<P> {
    port: P,
    session: Session,
}

impl<P: NavigationPort> ClientController<P> {
    /// Build the session from the port's current location.
    ///
    /// Returns the controller together with any command the first page
    /// needs run straight away.
    pub fn start(port: P) -> (Self, Vec<Command>) {
        let (session, effects) = Session::start(&port.current_location());
        let mut ctrl = Self { port, session };
        let commands = ctrl.perform(effects);
        (ctrl, commands)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn dispatch(&mut self, event: Event) -> Vec<Command> {
        let session = std::mem::take(&mut self.session);
        let (session, effects) = session.update(event);
        self.session = session;
        self.perform(effects)
    }

    /// Report a finished command.
    pub fn complete(&mut self, completion: Completion) -> Vec<Command> {
        self.dispatch(Event::Completed(completion))
    }

    // -- private -----------------------------------------------------------

    fn perform(&mut self, effects: Vec<Effect>) -> Vec<Command> {
        let mut commands = Vec::new();
        for effect in effects {
            match effect {
                Effect::PushHistory(entry) => {
                    if let Err(e) = self.port.push_state(&entry, &entry.url()) {
                        warn!(error = %e, "could not push history entry");
                    }
                }
                Effect::ReplaceHistory(entry) => {
                    if let Err(e) = self.port.replace_state(&entry, &entry.url()) {
                        warn!(error = %e, "could not replace history entry");
                    }
                }
                Effect::Send(command) => commands.push(command),
            }
        }
        commands
    }
}

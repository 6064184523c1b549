//! Platform-agnostic Dioxus application loop.
//!
//! One coroutine owns the [`ClientController`]. UI events arrive over the
//! coroutine channel; network commands run concurrently on the local
//! executor and their completions are fed back through the same
//! controller, so the session decides which ones are still wanted.

use std::rc::Rc;

use dioxus::prelude::*;
use futures_util::future::LocalBoxFuture;
use futures_util::stream::FuturesUnordered;
use futures_util::{FutureExt, StreamExt};
use poker_client::client_controller::ClientController;
use poker_client::gateway::{Command, Completion, Gateway};
use poker_client::navigation::NavigationPort;
use poker_client::session::{Event, Session};
use poker_core::transport::HttpTransport;
use tracing::{debug, info};

type InFlight = FuturesUnordered<LocalBoxFuture<'static, Completion>>;

fn launch<T: HttpTransport + 'static>(
    gateway: &Rc<Gateway<T>>,
    in_flight: &mut InFlight,
    commands: Vec<Command>,
) {
    for command in commands {
        debug!(request = %command.request(), "sending");
        let gateway = Rc::clone(gateway);
        in_flight.push(async move { gateway.execute(command).await }.boxed_local());
    }
}

/// Drive the session until the UI channel closes.
///
/// `session` is refreshed after every event and every completion.
pub async fn run_app_session<P, T>(
    mut rx: UnboundedReceiver<Event>,
    port: P,
    gateway: Rc<Gateway<T>>,
    mut session: Signal<Session>,
) where
    P: NavigationPort,
    T: HttpTransport + 'static,
{
    let (mut ctrl, commands) = ClientController::start(port);
    session.set(ctrl.session().clone());

    let mut in_flight = InFlight::new();
    launch(&gateway, &mut in_flight, commands);

    loop {
        let commands = tokio::select! {
            Some(event) = rx.next() => ctrl.dispatch(event),
            Some(completion) = in_flight.next(), if !in_flight.is_empty() => {
                ctrl.complete(completion)
            }
            else => break,
        };
        session.set(ctrl.session().clone());
        launch(&gateway, &mut in_flight, commands);
    }
    info!("ui channel closed, session loop exiting");
}

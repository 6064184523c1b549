//! Root application component for the web frontend.
//!
//! Wires the browser history and the Fetch transport into the shared
//! session loop, then renders whatever page the session is on.

use std::rc::Rc;

use dioxus::prelude::*;
use poker_client::config::ClientConfig;
use poker_client::gateway::Gateway;
use poker_client::http_transport::FetchTransport;
use poker_client::navigation::NavigationPort;
use poker_client::session::{Event, Session};
use poker_ui::PageView;
use poker_ui::app_logic::run_app_session;
use tracing::error;

use crate::browser_history::BrowserHistory;

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Root `<App>` component.
#[component]
pub fn App() -> Element {
    let session = use_signal(Session::default);

    // Spawn the session coroutine. Components send `Event`s via the handle.
    let coroutine = use_coroutine(move |rx: UnboundedReceiver<Event>| async move {
        let port = match BrowserHistory::new() {
            Ok(port) => port,
            Err(e) => {
                error!(error = %e, "browser history unavailable");
                return;
            }
        };
        let config = ClientConfig::from_origin(&port.origin());
        let gateway = Rc::new(Gateway::new(FetchTransport, config));
        run_app_session(rx, port, gateway, session).await;
    });

    // Back/forward buttons feed the same coroutine as clicks do.
    use_hook(move || {
        let subscribed = BrowserHistory::new().and_then(|history| {
            history.subscribe_pop(Box::new(move |pop| {
                coroutine.send(Event::HistoryPopped(pop));
            }))
        });
        if let Err(e) = subscribed {
            error!(error = %e, "could not listen for history navigation");
        }
    });

    rsx! {
        document::Stylesheet { href: MAIN_CSS }
        div { class: "app",
            PageView { session: session() }
        }
    }
}

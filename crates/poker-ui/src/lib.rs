//! Shared Dioxus UI for the poker table client.
//!
//! This crate is platform-agnostic: it provides the page components and the
//! coroutine that drives a [`ClientController`](poker_client::client_controller::ClientController).
//! Components talk to the coroutine with
//! [`poker_client::session::Event`]s; the platform crate supplies the
//! history port and the HTTP transport.

pub mod app_logic;
pub mod components;

use dioxus::prelude::*;
use poker_client::session::{FatalError, Session, View};

use components::{create_form, fatal_screen, game_screen, landing};

/// Render whichever page the session is on. Fatal errors replace the page.
#[component]
pub fn PageView(session: Session) -> Element {
    let title = session.title();
    let page = match (session.fatal(), session.view()) {
        (Some(fatal), _) => rsx! { fatal_screen::FatalScreen { message: fatal.to_string() } },
        (None, View::Landing) => rsx! { landing::Landing {} },
        (None, View::Creating(flow)) => rsx! { create_form::CreateForm { flow: flow.clone() } },
        (None, View::Table(table)) => rsx! { game_screen::GameScreen { table: table.clone() } },
        (None, View::Broken(reason)) => {
            let fatal = FatalError::Configuration(reason.clone());
            rsx! { fatal_screen::FatalScreen { message: fatal.to_string() } }
        }
    };

    rsx! {
        document::Title { "{title}" }
        {page}
    }
}

//! Game screen, the login gate in front of the table.
//!
//! Mirrors the table view's sub-state: the login form until a passphrase is
//! accepted, then the table, or a full-page error if a stored passphrase
//! stops working.

use dioxus::prelude::*;
use poker_client::session::FatalError;
use poker_client::table::{TableStatus, TableView};

use super::{fatal_screen, login_form, poker_table};

#[component]
pub fn GameScreen(table: TableView) -> Element {
    match &table.status {
        TableStatus::Login(flow) => rsx! {
            login_form::LoginForm { game_id: table.game_id, flow: flow.clone() }
        },
        TableStatus::Syncing { snapshot: None, .. } => rsx! {
            div { class: "page loading",
                "Loading table…"
            }
        },
        TableStatus::Syncing { snapshot: Some(snapshot), .. } => rsx! {
            poker_table::PokerTable { snapshot: snapshot.clone(), syncing: true }
        },
        TableStatus::Ready(snapshot) => rsx! {
            poker_table::PokerTable { snapshot: snapshot.clone(), syncing: false }
        },
        TableStatus::Failed(message) => {
            let fatal = FatalError::Inconsistent(message.clone());
            rsx! { fatal_screen::FatalScreen { message: fatal.to_string() } }
        }
    }
}

//! The felt: every occupied seat at its anchor plus the action centre.

use dioxus::prelude::*;
use poker_client::table::layout;
use poker_core::protocol::GameSnapshot;

use super::seat;

#[component]
pub fn PokerTable(snapshot: GameSnapshot, syncing: bool) -> Element {
    let table = layout(&snapshot);
    let title = snapshot.title();
    let center_style = table.action_center.style();

    rsx! {
        div { class: "table-page",
            div { class: "table-header",
                div { class: "table-title", "{title}" }
                div { "Blind: {snapshot.blind_size}" }
                if syncing {
                    div { class: "syncing", "Syncing…" }
                }
            }
            div { class: "poker-table",
                for placed in table.seats.iter() {
                    div {
                        key: "{placed.seat}",
                        style: placed.anchor.style(),
                        seat::Seat { player: placed.player.clone() }
                    }
                }
                div {
                    class: "action-center",
                    style: "{center_style}",
                    "Waiting for action"
                }
            }
        }
    }
}

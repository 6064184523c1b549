//! One occupied seat: name, chip count, cards.

use dioxus::prelude::*;
use poker_core::protocol::PlayerView;

use super::card;

#[component]
pub fn Seat(player: PlayerView) -> Element {
    rsx! {
        div { class: "seat",
            div { class: "seat-cards",
                for (i, c) in player.cards.iter().enumerate() {
                    card::Card { key: "{i}", card: c.clone() }
                }
            }
            span { class: "seat-name", "{player.name}" }
            span { class: "chip-count", "{player.chips}" }
        }
    }
}

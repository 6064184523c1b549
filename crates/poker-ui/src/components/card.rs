//! Card rendering helpers.

use dioxus::prelude::*;
use poker_core::protocol::{CardView, SuitColor};

/// Render a card, face-up or face-down as the server says.
#[component]
pub fn Card(card: CardView) -> Element {
    let Some((value, suit)) = card.face() else {
        return rsx! { CardBack {} };
    };
    let color_class = match suit.color() {
        SuitColor::Red => "suit-red",
        SuitColor::Black => "suit-black",
    };
    let glyph = suit.glyph();

    rsx! {
        div { class: "card {color_class}",
            div { class: "card-corner",
                span { class: "card-value", "{value}" }
                span { class: "card-suit", "{glyph}" }
            }
            div { class: "card-corner card-bottom",
                span { class: "card-value", "{value}" }
                span { class: "card-suit", "{glyph}" }
            }
        }
    }
}

/// Render a face-down card.
#[component]
pub fn CardBack() -> Element {
    rsx! {
        div { class: "card-back", title: "Back of card",
            span { "♠" }
        }
    }
}

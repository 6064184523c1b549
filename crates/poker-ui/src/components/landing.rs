//! Landing page.

use dioxus::prelude::*;
use poker_client::session::Event;

#[component]
pub fn Landing() -> Element {
    let coroutine = use_coroutine_handle::<Event>();

    rsx! {
        div { class: "page",
            div { class: "panel",
                h1 { class: "panel-title brand", "♠ Poker ♥" }
                p { class: "hint",
                    "Start a table and share its link, or open a link you were sent."
                }
                button {
                    class: "button",
                    onclick: move |_| coroutine.send(Event::CreateGameClicked),
                    "Create Game"
                }
            }
        }
    }
}

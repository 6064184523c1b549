//! Full-page error with no way back but a reload.

use dioxus::prelude::*;

#[component]
pub fn FatalScreen(message: String) -> Element {
    rsx! {
        div { class: "page",
            div { class: "panel panel-wide",
                h1 { class: "panel-title fatal-title", "Something went wrong" }
                p { class: "fatal-message", "{message}" }
                p { class: "hint", "Reload the page to start over." }
            }
        }
    }
}

//! Passphrase prompt shown before an existing table is revealed.

use dioxus::prelude::*;
use poker_client::login::LoginFlow;
use poker_client::session::Event;
use poker_core::protocol::GameId;

#[component]
pub fn LoginForm(game_id: GameId, flow: LoginFlow) -> Element {
    let coroutine = use_coroutine_handle::<Event>();
    let pending = flow.is_pending();

    rsx! {
        div { class: "page",
            div { class: "panel",
                h1 { class: "panel-title", "Game #{game_id}" }

                div { class: "field",
                    label { class: "field-label", "Passphrase" }
                    input {
                        class: "input",
                        r#type: "password",
                        value: "{flow.passphrase}",
                        oninput: move |e| coroutine.send(Event::LoginPassphrase(e.value())),
                    }
                }

                if !flow.error.is_empty() {
                    p { class: "form-error", "{flow.error}" }
                }

                button {
                    class: "button button-join",
                    disabled: pending,
                    onclick: move |_| coroutine.send(Event::SubmitLogin),
                    if pending { "Checking…" } else { "Join Table" }
                }
            }
        }
    }
}

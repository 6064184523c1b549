//! New game form: passphrase, starter chips and blind size.

use dioxus::prelude::*;
use poker_client::creation::CreationFlow;
use poker_client::session::Event;

#[component]
pub fn CreateForm(flow: CreationFlow) -> Element {
    let coroutine = use_coroutine_handle::<Event>();
    let pending = flow.is_pending();

    rsx! {
        div { class: "page",
            div { class: "panel",
                h1 { class: "panel-title", "New Game" }

                div { class: "field",
                    label { class: "field-label", "Passphrase" }
                    input {
                        class: "input",
                        r#type: "password",
                        value: "{flow.passphrase}",
                        oninput: move |e| coroutine.send(Event::CreationPassphrase(e.value())),
                    }
                    p { class: "field-hint", "Everyone at the table logs in with this" }
                }

                div { class: "field",
                    label { class: "field-label", "Starter Chips" }
                    input {
                        class: "input",
                        r#type: "text",
                        inputmode: "numeric",
                        value: "{flow.starter_chips}",
                        oninput: move |e| coroutine.send(Event::CreationStarterChips(e.value())),
                    }
                }

                div { class: "field",
                    label { class: "field-label", "Blind Size" }
                    input {
                        class: "input",
                        r#type: "text",
                        inputmode: "numeric",
                        value: "{flow.blind_size}",
                        oninput: move |e| coroutine.send(Event::CreationBlindSize(e.value())),
                    }
                }

                if !flow.error.is_empty() {
                    p { class: "form-error", "{flow.error}" }
                }

                button {
                    class: "button",
                    disabled: pending,
                    onclick: move |_| coroutine.send(Event::SubmitCreation),
                    if pending { "Creating…" } else { "Create" }
                }
            }
        }
    }
}

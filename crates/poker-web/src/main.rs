mod app;
mod browser_history;

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(app::App);
}

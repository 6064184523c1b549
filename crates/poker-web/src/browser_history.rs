//! [`NavigationPort`] over `window.history`.
//!
//! Entries are stored as their JSON string so that anything else writing
//! to the history (or an older build) shows up as unreadable rather than
//! as a half-decoded object.

use poker_client::navigation::{
    HistoryEntry, Location, NavigationError, NavigationPort, PopEvent, RawState,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{History, PopStateEvent, Window};

pub struct BrowserHistory {
    window: Window,
    history: History,
}

impl BrowserHistory {
    pub fn new() -> Result<Self, NavigationError> {
        let window =
            web_sys::window().ok_or_else(|| NavigationError::Browser("no global `window`".into()))?;
        let history = window.history().map_err(js_error)?;
        Ok(Self { window, history })
    }

    /// `scheme://host[:port]` of the page.
    pub fn origin(&self) -> String {
        self.window.location().origin().unwrap_or_default()
    }
}

impl NavigationPort for BrowserHistory {
    fn current_location(&self) -> Location {
        location_of(&self.window)
    }

    fn push_state(&self, entry: &HistoryEntry, url: &str) -> Result<(), NavigationError> {
        self.history
            .push_state_with_url(&JsValue::from_str(&entry.encode()), "", Some(url))
            .map_err(js_error)
    }

    fn replace_state(&self, entry: &HistoryEntry, url: &str) -> Result<(), NavigationError> {
        self.history
            .replace_state_with_url(&JsValue::from_str(&entry.encode()), "", Some(url))
            .map_err(js_error)
    }

    fn subscribe_pop(&self, handler: Box<dyn Fn(PopEvent)>) -> Result<(), NavigationError> {
        let window = self.window.clone();
        let closure = Closure::<dyn Fn(PopStateEvent)>::new(move |ev: PopStateEvent| {
            handler(pop_event(&window, ev.state()));
        });
        self.window
            .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
            .map_err(js_error)?;
        // Lives as long as the page.
        closure.forget();
        Ok(())
    }
}

fn location_of(window: &Window) -> Location {
    let location = window.location();
    Location::new(
        &location.pathname().unwrap_or_default(),
        &location.search().unwrap_or_default(),
    )
}

fn pop_event(window: &Window, state: JsValue) -> PopEvent {
    if state.is_null() || state.is_undefined() {
        return PopEvent::from_raw(RawState::Absent, location_of(window));
    }
    match state.as_string() {
        Some(raw) => PopEvent::from_raw(RawState::Text(&raw), Location::default()),
        None => PopEvent::from_raw(RawState::Foreign(&format!("{state:?}")), Location::default()),
    }
}

fn js_error(value: JsValue) -> NavigationError {
    NavigationError::Browser(format!("{value:?}"))
}

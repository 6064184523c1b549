//! URL routing and the browser-history seam.
//!
//! The session state machine never touches `window.history` itself; it
//! talks to a [`NavigationPort`]. The web crate implements the port over
//! `web_sys::History`, tests implement it over a vector.

use poker_core::protocol::{GameId, GameSnapshot};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("history state is not a session entry: {0}")]
    UnreadableState(String),
    #[error("history update failed: {0}")]
    Browser(String),
}

/// Path and query string of the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    /// Without the leading `?`.
    pub query: String,
}

impl Location {
    pub fn new(path: &str, query: &str) -> Self {
        Self {
            path: path.to_string(),
            query: query.trim_start_matches('?').to_string(),
        }
    }

    /// Split a path-relative URL such as `/game?gameID=3#top`.
    pub fn parse(url: &str) -> Self {
        let url = url.split('#').next().unwrap_or_default();
        match url.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(url, ""),
        }
    }

    /// First value of a query parameter.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

/// Which page a URL names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Landing,
    Creating,
    Game(GameId),
}

impl Route {
    /// `/create` and `/game?gameID=<int>` are recognised; everything else,
    /// including `/game` without a usable id, is the landing page.
    pub fn from_location(location: &Location) -> Self {
        match location.path.as_str() {
            "/create" => Route::Creating,
            "/game" => location
                .param("gameID")
                .and_then(|id| id.parse().ok())
                .map_or(Route::Landing, Route::Game),
            _ => Route::Landing,
        }
    }

    /// Canonical URL for this route.
    pub fn url(self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Creating => "/create".to_string(),
            Route::Game(game_id) => format!("/game?gameID={game_id}"),
        }
    }
}

/// What the session stores at each history position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "camelCase")]
pub enum HistoryEntry {
    Landing,
    Creating,
    #[serde(rename_all = "camelCase")]
    InGame {
        game_id: GameId,
        #[serde(default)]
        passphrase: String,
        #[serde(default)]
        snapshot: Option<GameSnapshot>,
    },
}

impl HistoryEntry {
    /// A fresh entry for a route: no passphrase, nothing cached.
    pub fn for_route(route: Route) -> Self {
        match route {
            Route::Landing => HistoryEntry::Landing,
            Route::Creating => HistoryEntry::Creating,
            Route::Game(game_id) => HistoryEntry::InGame {
                game_id,
                passphrase: String::new(),
                snapshot: None,
            },
        }
    }

    pub fn route(&self) -> Route {
        match self {
            HistoryEntry::Landing => Route::Landing,
            HistoryEntry::Creating => Route::Creating,
            HistoryEntry::InGame { game_id, .. } => Route::Game(*game_id),
        }
    }

    pub fn url(&self) -> String {
        self.route().url()
    }

    pub fn encode(&self) -> String {
        // Every field is a plain string, number, or map with integer keys.
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }

    pub fn decode(raw: &str) -> Result<Self, NavigationError> {
        serde_json::from_str(raw).map_err(|e| NavigationError::UnreadableState(e.to_string()))
    }
}

/// A back/forward navigation as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopEvent {
    /// The position carries an entry we pushed or replaced earlier.
    Restored(HistoryEntry),
    /// The position has no state; only its URL is known.
    Bare(Location),
    /// The position carries state we cannot read.
    Unreadable(String),
}

/// The `state` a `popstate` event carried, before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawState<'a> {
    /// `null` or `undefined`.
    Absent,
    Text(&'a str),
    /// Anything else, as the browser describes it.
    Foreign(&'a str),
}

impl PopEvent {
    /// Classify a popped history position. `location` is only used when
    /// the position has no state.
    pub fn from_raw(state: RawState<'_>, location: Location) -> Self {
        match state {
            RawState::Absent => PopEvent::Bare(location),
            RawState::Text(raw) => match HistoryEntry::decode(raw) {
                Ok(entry) => PopEvent::Restored(entry),
                Err(e) => PopEvent::Unreadable(e.to_string()),
            },
            RawState::Foreign(description) => {
                PopEvent::Unreadable(format!("not a string: {description}"))
            }
        }
    }
}

/// Browser history as the session state machine needs it.
pub trait NavigationPort {
    fn current_location(&self) -> Location;

    /// Add a history position.
    fn push_state(&self, entry: &HistoryEntry, url: &str) -> Result<(), NavigationError>;

    /// Overwrite the current history position.
    fn replace_state(&self, entry: &HistoryEntry, url: &str) -> Result<(), NavigationError>;

    /// Call `handler` on every back/forward navigation.
    fn subscribe_pop(&self, handler: Box<dyn Fn(PopEvent)>) -> Result<(), NavigationError>;
}

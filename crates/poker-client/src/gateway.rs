//! HTTP session gateway.
//!
//! Turns the two game API calls into a uniform `Result<GameSnapshot,
//! GatewayError>`. One network round-trip per call; the gateway never
//! retries and never caches.

use std::fmt;

use poker_core::protocol::{CreateGameRequest, GameId, GameSnapshot, StatusRequest};
use poker_core::transport::{HttpResponse, HttpTransport, TransportError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ClientConfig;

/// Shown when the server could not be reached or said nothing useful.
pub const GENERIC_FAILURE: &str = "Could not reach the poker server";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The server answered with a non-success status; the text is its body.
    #[error("{0}")]
    Server(String),
    /// No response at all.
    #[error("{message}", message = GENERIC_FAILURE)]
    Unreachable(#[source] TransportError),
    /// A success status with a body that is not a valid snapshot.
    #[error("Unexpected response from the poker server: {0}")]
    Malformed(String),
}

/// Identity of one outgoing request, unique within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A network call some part of the session wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchStatus {
        request: RequestId,
        game_id: GameId,
        passphrase: String,
    },
    CreateGame {
        request: RequestId,
        passphrase: String,
        starter_chips: u64,
        blind_size: u64,
    },
}

impl Command {
    pub fn request(&self) -> RequestId {
        match self {
            Command::FetchStatus { request, .. } | Command::CreateGame { request, .. } => *request,
        }
    }
}

/// The result of a [`Command`], tagged with the request it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub request: RequestId,
    pub result: Result<GameSnapshot, GatewayError>,
}

pub struct Gateway<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: HttpTransport> Gateway<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub async fn fetch_status(
        &self,
        game_id: GameId,
        passphrase: &str,
    ) -> Result<GameSnapshot, GatewayError> {
        let body = StatusRequest {
            game_id,
            passphrase: passphrase.to_string(),
        };
        self.post(&self.config.status_url(), &body).await
    }

    pub async fn create_game(
        &self,
        passphrase: &str,
        starter_chips: u64,
        blind_size: u64,
    ) -> Result<GameSnapshot, GatewayError> {
        let body = CreateGameRequest {
            passphrase: passphrase.to_string(),
            starter_chips,
            blind_size,
        };
        self.post(&self.config.create_url(), &body).await
    }

    /// Perform a [`Command`] and tag the outcome with its request id.
    pub async fn execute(&self, command: Command) -> Completion {
        let request = command.request();
        let result = match command {
            Command::FetchStatus {
                game_id,
                passphrase,
                ..
            } => self.fetch_status(game_id, &passphrase).await,
            Command::CreateGame {
                passphrase,
                starter_chips,
                blind_size,
                ..
            } => self.create_game(&passphrase, starter_chips, blind_size).await,
        };
        Completion { request, result }
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<GameSnapshot, GatewayError> {
        let json = serde_json::to_string(body).map_err(|e| GatewayError::Malformed(e.to_string()))?;
        debug!(url, "posting game request");

        let response = self.transport.post_json(url, json).await.map_err(|e| {
            warn!(url, error = %e, "game request failed in transport");
            GatewayError::Unreachable(e)
        })?;
        decode_response(response).inspect_err(|e| warn!(url, error = %e, "game request rejected"))
    }
}

fn decode_response(response: HttpResponse) -> Result<GameSnapshot, GatewayError> {
    if !response.is_ok() {
        // `http.Error` appends a newline to the message.
        let text = response.body.trim_end();
        if text.is_empty() {
            return Err(GatewayError::Server(GENERIC_FAILURE.to_string()));
        }
        return Err(GatewayError::Server(text.to_string()));
    }
    serde_json::from_str(&response.body).map_err(|e| GatewayError::Malformed(e.to_string()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Replays canned responses and records every request.
    #[derive(Clone, Default)]
    pub struct ScriptedTransport {
        pub replies: Rc<RefCell<VecDeque<Result<HttpResponse, TransportError>>>>,
        pub sent: Rc<RefCell<Vec<(String, serde_json::Value)>>>,
    }

    impl ScriptedTransport {
        pub fn reply(&self, status: u16, body: &str) {
            self.replies.borrow_mut().push_back(Ok(HttpResponse {
                status,
                body: body.to_string(),
            }));
        }

        pub fn fail(&self, message: &str) {
            self.replies
                .borrow_mut()
                .push_back(Err(TransportError::Network(message.to_string())));
        }
    }

    impl HttpTransport for ScriptedTransport {
        async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
            let value = serde_json::from_str(&body).expect("request body is JSON");
            self.sent.borrow_mut().push((url.to_string(), value));
            self.replies
                .borrow_mut()
                .pop_front()
                .expect("no scripted reply left")
        }
    }

    pub fn snapshot_json(game_id: u64) -> String {
        format!(
            r#"{{"gameID": {game_id}, "starterChips": 100, "blindSize": 10,
                "emptySeats": [1, 2, 3, 4, 5, 6, 7],
                "players": {{"0": {{"name": "ann", "chips": 100, "seat": 0}}}}}}"#
        )
    }

    fn gateway(transport: &ScriptedTransport) -> Gateway<ScriptedTransport> {
        Gateway::new(transport.clone(), ClientConfig::default())
    }

    #[test]
    fn fetch_status_success() {
        let transport = ScriptedTransport::default();
        transport.reply(200, &snapshot_json(42));

        let snap = tokio_test::block_on(gateway(&transport).fetch_status(42, "secret")).unwrap();
        assert_eq!(snap.game_id, 42);

        let sent = transport.sent.borrow();
        assert_eq!(sent[0].0, "/api/v1/game/status");
        assert_eq!(sent[0].1, serde_json::json!({"gameID": 42, "passphrase": "secret"}));
    }

    #[test]
    fn server_error_text_is_verbatim() {
        let transport = ScriptedTransport::default();
        transport.reply(400, "Could not find/load game\n");

        let err = tokio_test::block_on(gateway(&transport).fetch_status(1, "wrong")).unwrap_err();
        assert_eq!(err, GatewayError::Server("Could not find/load game".into()));
        assert_eq!(err.to_string(), "Could not find/load game");
    }

    #[test]
    fn empty_error_body_uses_generic_message() {
        let transport = ScriptedTransport::default();
        transport.reply(500, "");

        let err = tokio_test::block_on(gateway(&transport).fetch_status(1, "pw")).unwrap_err();
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn transport_failure_uses_generic_message() {
        let transport = ScriptedTransport::default();
        transport.fail("TypeError: Failed to fetch");

        let err = tokio_test::block_on(gateway(&transport).create_game("pw", 100, 10)).unwrap_err();
        assert!(matches!(err, GatewayError::Unreachable(_)));
        assert_eq!(err.to_string(), GENERIC_FAILURE);
    }

    #[test]
    fn create_game_sends_settings() {
        let transport = ScriptedTransport::default();
        transport.reply(200, r#"{"gameID": 7, "starterChips": 100, "blindSize": 10, "emptySeats": null, "players": null}"#);

        let snap = tokio_test::block_on(gateway(&transport).create_game("pw", 100, 10)).unwrap();
        assert_eq!(snap.game_id, 7);

        let sent = transport.sent.borrow();
        assert_eq!(sent[0].0, "/api/v1/game/create");
        assert_eq!(
            sent[0].1,
            serde_json::json!({"passphrase": "pw", "starterChips": 100, "blindSize": 10})
        );
    }

    #[test]
    fn out_of_range_seat_is_malformed() {
        let transport = ScriptedTransport::default();
        transport.reply(200, r#"{"gameID": 1, "blindSize": 2, "emptySeats": [8]}"#);

        let err = tokio_test::block_on(gateway(&transport).fetch_status(1, "pw")).unwrap_err();
        assert!(matches!(err, GatewayError::Malformed(_)));
    }

    #[test]
    fn execute_tags_completion() {
        let transport = ScriptedTransport::default();
        transport.reply(200, &snapshot_json(5));

        let completion = tokio_test::block_on(gateway(&transport).execute(Command::FetchStatus {
            request: RequestId(9),
            game_id: 5,
            passphrase: "pw".into(),
        }));
        assert_eq!(completion.request, RequestId(9));
        assert_eq!(completion.result.unwrap().game_id, 5);
    }
}

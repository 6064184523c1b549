//! Transport abstraction for HTTP communication.
//!
//! Decouples the session gateway from any specific HTTP stack. The browser
//! build plugs in `gloo-net`; tests plug in a scripted fake.

use std::future::Future;

use thiserror::Error;

/// Errors that can occur before a response arrives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never completed (network down, CORS, aborted, ...).
    #[error("{0}")]
    Network(String),
}

/// Status code and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Sends JSON bodies with `POST` and hands back whatever the server replied.
///
/// Implementations perform exactly one round-trip per call: no retries,
/// no caching. The returned future need not be `Send`; browser futures
/// never are.
pub trait HttpTransport {
    fn post_json(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

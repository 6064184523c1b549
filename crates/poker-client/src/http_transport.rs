//! Browser HTTP transport.
//!
//! Uses `gloo-net` (the Fetch API) so it only builds for WASM targets with
//! the `web` feature. Requests bypass the HTTP cache and send no referrer.

use gloo_net::http::Request;
use poker_core::transport::{HttpResponse, HttpTransport, TransportError};
use web_sys::{ReferrerPolicy, RequestCache};

/// [`HttpTransport`] over `window.fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl HttpTransport for FetchTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        let request = Request::post(url)
            .header("Content-Type", "application/json")
            .cache(RequestCache::NoCache)
            .referrer_policy(ReferrerPolicy::NoReferrer)
            .body(body)
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

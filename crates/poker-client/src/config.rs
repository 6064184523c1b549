//! Where the client finds the game API.

/// Default API prefix, resolved against the page that served the client.
pub const DEFAULT_API_BASE: &str = "/api/v1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the game API, without a trailing slash.
    pub api_base: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }
}

impl ClientConfig {
    /// API rooted at a page origin such as `https://host:8080`.
    pub fn from_origin(origin: &str) -> Self {
        Self {
            api_base: format!("{}{DEFAULT_API_BASE}", origin.trim_end_matches('/')),
        }
    }

    pub fn status_url(&self) -> String {
        format!("{}/game/status", self.api_base)
    }

    pub fn create_url(&self) -> String {
        format!("{}/game/create", self.api_base)
    }
}

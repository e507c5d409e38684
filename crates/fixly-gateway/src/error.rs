//! Gateway error taxonomy shared by the HTTP adapters.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("could not build HTTP client: {0}")]
    Client(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("no response from server")]
    NoResponse,

    #[error("server returned {0}")]
    Status(u16),

    #[error("parse error: {0}")]
    Parse(String),
}

impl GatewayError {
    /// Classify a reqwest failure: timeouts and connection failures mean
    /// the request never produced a response.
    pub fn from_request(error: reqwest::Error) -> Self {
        if error.is_timeout() || error.is_connect() {
            Self::NoResponse
        } else {
            Self::Network(error.to_string())
        }
    }
}

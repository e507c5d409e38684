//! Fixly API Gateway
//!
//! reqwest-based implementations of the outbound ports in
//! `fixly-complaints`, talking to the remote Fixly portal API. Every
//! request carries the bearer credential from the shared [`SessionStore`];
//! credential refresh is handled by the surrounding application, not here.

pub mod complaints;
pub mod error;
pub mod nearest;
pub mod postal;
pub mod session;

pub use complaints::HttpComplaintApi;
pub use error::GatewayError;
pub use nearest::HttpNearestOptions;
pub use postal::HttpPostalDirectory;
pub use session::SessionStore;

/// Timeout applied to every gateway request
pub(crate) const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build the shared HTTP client used by the gateway adapters
pub(crate) fn http_client() -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| GatewayError::Client(e.to_string()))
}

/// Errors from the transit HTTP layer.
use thiserror::Error;

use super::client::Endpoint;

/// Typed errors from talking to the AC Transit API.
#[derive(Debug, Error)]
pub enum TransitError {
    /// Transport failure or timeout contacting the API.
    #[error("{endpoint} request failed: {source}")]
    Network {
        /// Which endpoint was being fetched.
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("{endpoint} request returned HTTP {status}")]
    UpstreamStatus {
        /// Which endpoint was being fetched.
        endpoint: Endpoint,
        /// Numeric HTTP status code.
        status: u16,
    },

    /// The body was empty or not the expected JSON shape.
    #[error("{endpoint} response could not be decoded: {source}")]
    Decode {
        /// Which endpoint was being fetched.
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    /// The base URL cannot carry path segments or failed to parse.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Missing token, zero timeout, or the HTTP client failed to build.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TransitError {
    /// Machine-readable code used in JSON error output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network_error",
            Self::UpstreamStatus { .. } => "upstream_status",
            Self::Decode { .. } => "decode_error",
            Self::InvalidUrl(_) => "invalid_url",
            Self::Configuration(_) => "configuration",
        }
    }
}

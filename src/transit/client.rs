/// AC Transit REST client.
///
/// Two read-only endpoints per stop: real-time predictions and the stop
/// profile. Each call is a single GET; the response body is fully read and
/// released before decoding, on success and failure alike.
use std::fmt;
use std::time::Duration;

use reqwest::Url;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::config::TransitConfig;
use super::errors::TransitError;
use crate::types::{PredictionsEnvelope, StopProfile};

/// Content type sent with every request.
const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Which upstream endpoint a request (or error) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /actrealtime/prediction?stpid=..`
    Predictions,
    /// `GET /stop/{id}/profile`
    StopProfile,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Predictions => f.write_str("predictions"),
            Self::StopProfile => f.write_str("stop profile"),
        }
    }
}

/// HTTP client for the AC Transit API.
#[derive(Debug, Clone)]
pub struct TransitClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl TransitClient {
    /// Build a client from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `TransitError::Configuration` for an invalid config or if the
    /// HTTP client cannot be built, `TransitError::InvalidUrl` if the base URL
    /// does not parse.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        config.validate().map_err(TransitError::Configuration)?;

        let base_url = Url::parse(config.base_url.trim())
            .map_err(|e| TransitError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(TransitError::InvalidUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("bustimes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransitError::Configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            token: config.token.clone(),
        })
    }

    /// URL of the predictions endpoint for `stop_id`.
    ///
    /// # Errors
    ///
    /// Returns `TransitError::InvalidUrl` if the base URL cannot take path segments.
    pub fn predictions_url(&self, stop_id: &str) -> Result<Url, TransitError> {
        let mut url = self.endpoint_url(&["actrealtime", "prediction"])?;
        url.query_pairs_mut()
            .append_pair("stpid", stop_id)
            .append_pair("token", &self.token);
        Ok(url)
    }

    /// URL of the stop-profile endpoint for `stop_id`.
    ///
    /// # Errors
    ///
    /// Returns `TransitError::InvalidUrl` if the base URL cannot take path segments.
    pub fn stop_profile_url(&self, stop_id: &str) -> Result<Url, TransitError> {
        let mut url = self.endpoint_url(&["stop", stop_id, "profile"])?;
        url.query_pairs_mut().append_pair("token", &self.token);
        Ok(url)
    }

    /// Fetch upcoming arrival predictions for a stop.
    ///
    /// # Errors
    ///
    /// Returns `Network`, `UpstreamStatus`, or `Decode` on failure.
    pub async fn predictions(&self, stop_id: &str) -> Result<PredictionsEnvelope, TransitError> {
        let url = self.predictions_url(stop_id)?;
        self.get_json(Endpoint::Predictions, stop_id, url).await
    }

    /// Fetch the profile (place description, street) of a stop.
    ///
    /// # Errors
    ///
    /// Returns `Network`, `UpstreamStatus`, or `Decode` on failure.
    pub async fn stop_profile(&self, stop_id: &str) -> Result<StopProfile, TransitError> {
        let url = self.stop_profile_url(stop_id)?;
        self.get_json(Endpoint::StopProfile, stop_id, url).await
    }

    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, TransitError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransitError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        stop_id: &str,
        url: Url,
    ) -> Result<T, TransitError> {
        // The URL carries the token: log the endpoint and stop only, and strip
        // the URL from transport errors before they are displayed.
        debug!(%endpoint, stop_id, "requesting");

        let response = self
            .http
            .get(url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .send()
            .await
            .map_err(|source| TransitError::Network {
                endpoint,
                source: source.without_url(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransitError::UpstreamStatus {
                endpoint,
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| TransitError::Network {
                endpoint,
                source: source.without_url(),
            })?;
        debug!(%endpoint, stop_id, bytes = body.len(), "response received");

        serde_json::from_slice(&body).map_err(|source| TransitError::Decode { endpoint, source })
    }
}

/// Default AC Transit REST root.
pub const DEFAULT_BASE_URL: &str = "https://api.actransit.org/transit";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`super::TransitClient`].
#[derive(Debug, Clone)]
pub struct TransitConfig {
    /// REST root; endpoints are appended as path segments.
    pub base_url: String,
    /// Access token sent as the `token` query parameter.
    pub token: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl TransitConfig {
    /// Create a config for the production API with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            token: token.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base URL must not be empty".to_owned());
        }
        if self.token.trim().is_empty() {
            return Err("an API token is required (--token or ACTRANSIT_TOKEN)".to_owned());
        }
        if self.timeout_secs == 0 {
            return Err("timeout must be greater than 0 seconds".to_owned());
        }
        Ok(())
    }
}

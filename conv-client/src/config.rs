//! Client configuration.

use std::time::Duration;

use reqwest::Url;

use crate::error::ConversionError;

/// Environment variable read by the CLI for the endpoint URL.
pub const ENDPOINT_ENV: &str = "CONV_API_URL";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Settings for talking to the conversion service.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ClientConfig {
    /// URL the multipart form is posted to.
    pub endpoint: Url,
    /// Whole-request timeout (default: 60 s). There are no retries.
    pub timeout: Duration,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Request logging level: 0 = off, 1 = summary line, 2 = summary and response body.
    pub verbose: u8,
}

impl ClientConfig {
    /// Config for the given endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEndpoint` if `endpoint` does not parse as an http(s) URL.
    pub fn new(endpoint: &str) -> Result<Self, ConversionError> {
        let url = Url::parse(endpoint).map_err(|e| ConversionError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            cause: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConversionError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                cause: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        Ok(Self {
            endpoint: url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("conv/{}", env!("CARGO_PKG_VERSION")),
            verbose: 0,
        })
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }
}

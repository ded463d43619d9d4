use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to create HTTP client: {0}")]
    ClientError(#[source] reqwest::Error),

    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    #[error("HTTP error with status code: {0}")]
    HttpError(u16),

    #[error("Failed to read response body: {0}")]
    BodyError(#[source] reqwest::Error),
}

impl FetchError {
    /// Whether the request was aborted by the client timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::NetworkError(e) | Self::BodyError(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// A source of raw weather payloads
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Performs a single request and returns the raw body
    async fn fetch(&self) -> Result<String, FetchError>;

    /// The URL the payloads are fetched from
    fn source_url(&self) -> &str;
}

/// Fetches raw payloads from the weather provider over HTTP
pub struct Fetcher {
    client: Client,
    url: Url,
}

impl Fetcher {
    /// Creates a new Fetcher for a fixed provider URL
    pub fn new(url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("weatherstation/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::ClientError)?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl WeatherSource for Fetcher {
    async fn fetch(&self) -> Result<String, FetchError> {
        debug!("Fetching weather data from {}", self.url.path());

        let response = self
            .client
            .get(self.url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FetchError::NetworkError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpError(status.as_u16()));
        }

        let body = response.text().await.map_err(FetchError::BodyError)?;

        debug!("Fetched {} bytes of weather data", body.len());
        Ok(body)
    }

    fn source_url(&self) -> &str {
        self.url.as_str()
    }
}

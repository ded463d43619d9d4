use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;
use validator::Validate;

use super::metrics_config::MetricsConfig;
use super::parser::ConfigError;
use crate::constants;

/// The main configuration structure for the weather station
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeatherStationConfig {
    /// Weather provider and polling configuration
    #[validate]
    pub station: StationConfig,

    /// Where the last good provider payload is kept
    #[serde(default)]
    #[validate]
    pub storage: StorageConfig,

    /// HTTP API configuration
    #[serde(default)]
    #[validate]
    pub api: ApiConfig,

    /// Metrics configuration
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Configuration for the weather provider and the poll loop
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StationConfig {
    /// Latitude of the station in decimal degrees
    pub latitude: f64,

    /// Longitude of the station in decimal degrees
    pub longitude: f64,

    /// Provider API key (optional, falls back to `api_key_env`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Environment variable consulted when `api_key` is not set
    #[serde(default = "default_api_key_env")]
    #[validate(length(min = 1))]
    pub api_key_env: String,

    /// Provider endpoint queried with the station coordinates
    #[serde(default = "default_provider_url")]
    #[validate(url)]
    pub provider_url: String,

    /// Delay between two polls (in seconds)
    #[serde(default = "default_poll_interval")]
    #[validate(range(min = 1))]
    pub poll_interval_secs: u64,

    /// Timeout applied to a single provider request (in seconds)
    #[serde(default = "default_request_timeout")]
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
}

impl StationConfig {
    /// Checks that the coordinates lie on the globe
    pub fn validate_coordinates(&self) -> Result<(), ConfigError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ConfigError::Other(format!(
                "Latitude {} must be between -90 and 90",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ConfigError::Other(format!(
                "Longitude {} must be between -180 and 180",
                self.longitude
            )));
        }
        Ok(())
    }

    /// Returns the API key from the configuration or, failing that, from the environment
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            return Ok(key.to_string());
        }

        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::Other(format!(
                "No provider API key configured: set station.api_key or the {} environment variable",
                self.api_key_env
            ))),
        }
    }

    /// Builds the fixed provider URL with coordinates and API key baked in
    pub fn source_url(&self, api_key: &str) -> Result<Url, ConfigError> {
        Url::parse_with_params(
            &self.provider_url,
            &[
                ("lat", self.latitude.to_string()),
                ("lon", self.longitude.to_string()),
                ("APPID", api_key.to_string()),
                ("units", constants::provider::UNITS.to_string()),
            ],
        )
        .map_err(|e| ConfigError::Other(format!("Invalid provider URL '{}': {}", self.provider_url, e)))
    }
}

/// Configuration for the persisted payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StorageConfig {
    /// Directory holding the persisted file (default: platform data directory)
    pub data_dir: Option<PathBuf>,

    /// Name of the persisted file
    #[serde(default = "default_file_name")]
    #[validate(length(min = 1))]
    pub file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            file_name: default_file_name(),
        }
    }
}

impl StorageConfig {
    /// Full path of the persisted payload file
    pub fn persisted_file_path(&self) -> PathBuf {
        let dir = self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(constants::storage::APP_DIR_NAME)
        });
        dir.join(&self.file_name)
    }
}

/// Configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    /// Address to bind to
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_api_key_env() -> String {
    constants::network::DEFAULT_API_KEY_ENV.to_string()
}

fn default_provider_url() -> String {
    constants::provider::OPENWEATHERMAP_URL.to_string()
}

fn default_poll_interval() -> u64 {
    constants::time::DEFAULT_POLL_INTERVAL_SECS
}

fn default_request_timeout() -> u64 {
    constants::network::HTTP_REQUEST_TIMEOUT_SECS
}

fn default_file_name() -> String {
    constants::storage::PERSISTED_FILE_NAME.to_string()
}

fn default_host() -> String {
    constants::api::DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    constants::api::DEFAULT_PORT
}

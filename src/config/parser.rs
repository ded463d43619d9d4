use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use validator::Validate;

use super::models::WeatherStationConfig;

/// Errors that can occur during configuration parsing
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Configuration error: {0}")]
    Other(String),
}

/// Provides default configuration file path
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".weatherstation")
        .join("config.yaml")
}

/// Loads and validates the weather station configuration
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<WeatherStationConfig, ConfigError> {
    let mut file = File::open(&config_path).map_err(ConfigError::FileError)?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(ConfigError::FileError)?;

    parse_config(&content)
}

/// Parses and validates configuration from a YAML string
pub fn parse_config(content: &str) -> Result<WeatherStationConfig, ConfigError> {
    let config: WeatherStationConfig =
        serde_yaml::from_str(content).map_err(ConfigError::ParseError)?;

    config.validate().map_err(ConfigError::ValidationError)?;

    // Check that the station coordinates are in range
    config.station.validate_coordinates()?;

    Ok(config)
}

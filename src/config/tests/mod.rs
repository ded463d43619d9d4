use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use crate::config::parser::{load_config, parse_config, ConfigError};

// Helper function to create a temporary file with content
fn create_temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes()).expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

#[test]
fn test_valid_configuration() {
    let config_yaml = r#"
    station:
      latitude: 49.87
      longitude: 8.65
      api_key: abc123
      provider_url: https://api.openweathermap.org/data/2.5/weather
      poll_interval_secs: 15
      request_timeout_secs: 3

    storage:
      data_dir: /var/lib/weatherstation
      file_name: last.json

    api:
      host: 127.0.0.1
      port: 8081

    metrics:
      enabled: false
    "#;

    let temp_file = create_temp_file(config_yaml);
    let config = load_config(temp_file.path()).expect("Failed to load valid config");

    assert_eq!(config.station.latitude, 49.87);
    assert_eq!(config.station.longitude, 8.65);
    assert_eq!(config.station.api_key.as_deref(), Some("abc123"));
    assert_eq!(config.station.poll_interval_secs, 15);
    assert_eq!(config.station.request_timeout_secs, 3);
    assert_eq!(
        config.storage.persisted_file_path(),
        PathBuf::from("/var/lib/weatherstation/last.json")
    );
    assert_eq!(config.api.host, "127.0.0.1");
    assert_eq!(config.api.port, 8081);
    assert!(!config.metrics.enabled);
}

#[test]
fn test_minimal_configuration_uses_defaults() {
    let config_yaml = r#"
    station:
      latitude: 0.0
      longitude: 0.0
    "#;

    let config = parse_config(config_yaml).expect("Failed to parse minimal config");

    assert_eq!(config.station.poll_interval_secs, 5);
    assert_eq!(config.station.request_timeout_secs, 10);
    assert_eq!(config.station.api_key_env, "WEATHERSTATION_API_KEY");
    assert_eq!(
        config.station.provider_url,
        "http://api.openweathermap.org/data/2.5/weather"
    );
    assert_eq!(config.storage.file_name, "WeatherStationValues.json");
    assert!(config
        .storage
        .persisted_file_path()
        .ends_with("weatherstation/WeatherStationValues.json"));
    assert_eq!(config.api.port, 8080);
    assert!(config.metrics.enabled);
}

#[test]
fn test_latitude_out_of_range() {
    let config_yaml = r#"
    station:
      latitude: 123.0
      longitude: 8.65
    "#;

    let result = parse_config(config_yaml);
    assert!(matches!(result, Err(ConfigError::Other(ref msg)) if msg.contains("Latitude")));
}

#[test]
fn test_longitude_out_of_range() {
    let config_yaml = r#"
    station:
      latitude: 10.0
      longitude: -181.0
    "#;

    let result = parse_config(config_yaml);
    assert!(matches!(result, Err(ConfigError::Other(ref msg)) if msg.contains("Longitude")));
}

#[test]
fn test_zero_poll_interval_rejected() {
    let config_yaml = r#"
    station:
      latitude: 10.0
      longitude: 10.0
      poll_interval_secs: 0
    "#;

    let result = parse_config(config_yaml);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_invalid_provider_url() {
    let config_yaml = r#"
    station:
      latitude: 10.0
      longitude: 10.0
      provider_url: not a url
    "#;

    let result = parse_config(config_yaml);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_missing_station_section() {
    let config_yaml = r#"
    api:
      port: 8080
    "#;

    let result = parse_config(config_yaml);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn test_missing_file() {
    let result = load_config("/nonexistent/weatherstation/config.yaml");
    assert!(matches!(result, Err(ConfigError::FileError(_))));
}

#[test]
fn test_source_url_contains_coordinates_and_key() {
    let config = parse_config(
        r#"
    station:
      latitude: 49.87
      longitude: 8.65
    "#,
    )
    .unwrap();

    let url = config.station.source_url("secret").unwrap();
    let query: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    assert_eq!(url.host_str(), Some("api.openweathermap.org"));
    assert!(query.contains(&("lat".to_string(), "49.87".to_string())));
    assert!(query.contains(&("lon".to_string(), "8.65".to_string())));
    assert!(query.contains(&("APPID".to_string(), "secret".to_string())));
    assert!(query.contains(&("units".to_string(), "metric".to_string())));
}

#[test]
fn test_api_key_prefers_config_value() {
    let config = parse_config(
        r#"
    station:
      latitude: 1.0
      longitude: 1.0
      api_key: from-config
      api_key_env: WEATHERSTATION_TEST_KEY_UNUSED
    "#,
    )
    .unwrap();

    assert_eq!(config.station.resolve_api_key().unwrap(), "from-config");
}

#[test]
fn test_api_key_from_environment() {
    std::env::set_var("WEATHERSTATION_TEST_KEY_FROM_ENV", "from-env");

    let config = parse_config(
        r#"
    station:
      latitude: 1.0
      longitude: 1.0
      api_key_env: WEATHERSTATION_TEST_KEY_FROM_ENV
    "#,
    )
    .unwrap();

    assert_eq!(config.station.resolve_api_key().unwrap(), "from-env");
}

#[test]
fn test_api_key_missing() {
    let config = parse_config(
        r#"
    station:
      latitude: 1.0
      longitude: 1.0
      api_key_env: WEATHERSTATION_TEST_KEY_NEVER_SET
    "#,
    )
    .unwrap();

    let err = config.station.resolve_api_key().unwrap_err();
    assert!(err.to_string().contains("WEATHERSTATION_TEST_KEY_NEVER_SET"));
}

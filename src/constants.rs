//! Application-wide constants
//!
//! This module contains the default values used throughout the weather station,
//! making them easy to find and modify.

/// Time-related constants
pub mod time {
    /// Delay between two polls of the weather provider (in seconds)
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

    /// Format used when rendering and parsing time-of-day values
    pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";
}

/// Network-related constants
pub mod network {
    /// Default HTTP request timeout towards the weather provider (in seconds)
    pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Environment variable holding the provider API key
    pub const DEFAULT_API_KEY_ENV: &str = "WEATHERSTATION_API_KEY";
}

/// Weather provider constants
pub mod provider {
    /// OpenWeatherMap current weather endpoint
    pub const OPENWEATHERMAP_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

    /// Unit system requested from the provider
    pub const UNITS: &str = "metric";
}

/// Persistence-related constants
pub mod storage {
    /// Name of the file holding the last good provider payload
    pub const PERSISTED_FILE_NAME: &str = "WeatherStationValues.json";

    /// Directory created under the platform data directory
    pub const APP_DIR_NAME: &str = "weatherstation";
}

/// HTTP API constants
pub mod api {
    /// Default bind address for the HTTP API
    pub const DEFAULT_HOST: &str = "0.0.0.0";

    /// Default port for the HTTP API
    pub const DEFAULT_PORT: u16 = 8080;

    /// Path serving the weather station status and overrides
    pub const WEATHER_STATION_PATH: &str = "/weatherStation";

    /// Path serving the daylight view
    pub const DAYLIGHT_PATH: &str = "/weatherStation/daylight";

    /// Path serving Prometheus metrics
    pub const METRICS_PATH: &str = "/metrics";
}

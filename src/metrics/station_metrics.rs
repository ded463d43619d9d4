use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, Counter, CounterVec, Gauge,
};
use tracing::debug;

use crate::weather::Snapshot;

lazy_static! {
    /// Provider fetch attempts by outcome
    static ref FETCH_COUNT: CounterVec = register_counter_vec!(
        "weatherstation_fetches_total",
        "Total number of weather provider fetch attempts",
        &["status"]
    ).expect("Failed to create fetches_total metric");

    /// Fetches whose payload differed from the previous one
    static ref PAYLOAD_CHANGE_COUNT: Counter = register_counter!(
        "weatherstation_payload_changes_total",
        "Total number of fetched payloads that differed from the previous payload"
    ).expect("Failed to create payload_changes_total metric");

    /// Rejected payloads by origin
    static ref PARSE_ERROR_COUNT: CounterVec = register_counter_vec!(
        "weatherstation_parse_errors_total",
        "Total number of malformed weather payloads",
        &["origin"]
    ).expect("Failed to create parse_errors_total metric");

    /// Failed reads, writes or deletes of the persisted payload
    static ref PERSISTENCE_ERROR_COUNT: CounterVec = register_counter_vec!(
        "weatherstation_persistence_errors_total",
        "Total number of persisted payload failures",
        &["operation"]
    ).expect("Failed to create persistence_errors_total metric");

    /// Manual overrides applied through the API
    static ref OVERRIDE_COUNT: Counter = register_counter!(
        "weatherstation_overrides_total",
        "Total number of manual snapshot overrides"
    ).expect("Failed to create overrides_total metric");

    /// Unix timestamp of the last completed fetch
    static ref LAST_FETCH_TIMESTAMP: Gauge = register_gauge!(
        "weatherstation_last_fetch_timestamp",
        "Unix timestamp of the last completed weather fetch"
    ).expect("Failed to create last_fetch_timestamp metric");

    static ref TEMPERATURE_CELSIUS: Gauge = register_gauge!(
        "weatherstation_temperature_celsius",
        "Current temperature in degrees Celsius"
    ).expect("Failed to create temperature_celsius metric");

    static ref HUMIDITY_PERCENT: Gauge = register_gauge!(
        "weatherstation_humidity_percent",
        "Current relative humidity in percent"
    ).expect("Failed to create humidity_percent metric");

    static ref SITUATION_CODE: Gauge = register_gauge!(
        "weatherstation_situation_code",
        "Current provider weather condition code"
    ).expect("Failed to create situation_code metric");
}

/// Origin of a payload handed to the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOrigin {
    Live,
    Persisted,
}

impl PayloadOrigin {
    fn as_label(self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Persisted => "persisted",
        }
    }
}

/// Weather station metrics collector
pub struct StationMetrics;

impl StationMetrics {
    /// Record the outcome of a provider fetch
    pub fn record_fetch(success: bool, at: DateTime<Utc>) {
        let status = if success { "success" } else { "error" };
        FETCH_COUNT.with_label_values(&[status]).inc();

        if success {
            LAST_FETCH_TIMESTAMP.set(at.timestamp() as f64);
        }
    }

    /// Record a fetched payload that differed from the previous one
    pub fn record_payload_change() {
        PAYLOAD_CHANGE_COUNT.inc();
    }

    /// Record a payload rejected by the parser
    pub fn record_parse_error(origin: PayloadOrigin) {
        PARSE_ERROR_COUNT
            .with_label_values(&[origin.as_label()])
            .inc();
    }

    /// Record a failed operation on the persisted payload
    pub fn record_persistence_error(operation: &str) {
        PERSISTENCE_ERROR_COUNT
            .with_label_values(&[operation])
            .inc();
    }

    /// Record a manual override
    pub fn record_override() {
        OVERRIDE_COUNT.inc();
    }

    /// Publish the values of the current snapshot
    pub fn set_snapshot(snapshot: &Snapshot) {
        TEMPERATURE_CELSIUS.set(snapshot.temperature_celsius);
        HUMIDITY_PERCENT.set(snapshot.humidity_percent);
        SITUATION_CODE.set(snapshot.situation_code as f64);

        debug!(
            "Updated snapshot metrics: situation={}, temperature={}, humidity={}",
            snapshot.situation_code, snapshot.temperature_celsius, snapshot.humidity_percent
        );
    }
}

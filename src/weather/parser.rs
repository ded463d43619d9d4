use chrono::{DateTime, Local, NaiveTime, TimeZone};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::models::Snapshot;

/// Reasons a provider payload is rejected
#[derive(Debug, Error)]
pub enum MalformedPayload {
    #[error("Payload is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Payload is missing the '{0}' section")]
    MissingSection(&'static str),

    #[error("Payload 'weather' array is empty")]
    EmptyWeather,

    #[error("First 'weather' entry is not an object")]
    InvalidWeatherEntry,

    #[error("Value {value} at '{path}' is not a representable timestamp")]
    InvalidTimestamp { path: &'static str, value: f64 },
}

/// Converts raw OpenWeatherMap payloads into snapshots
///
/// Numeric fields that are absent or not numbers default to zero; only a
/// document that is not JSON, or lacks the `sys`, `main` or `weather`
/// sections, is rejected.
pub struct PayloadParser;

impl PayloadParser {
    /// Parses a payload, converting sunrise and sunset to the local time zone
    pub fn parse(raw: &str) -> Result<Snapshot, MalformedPayload> {
        Self::parse_in(raw, &Local)
    }

    /// Parses a payload, converting sunrise and sunset to the given time zone
    pub fn parse_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Result<Snapshot, MalformedPayload> {
        let document: Value = serde_json::from_str(raw)?;

        let sys = Self::section(&document, "sys")?;
        let main = Self::section(&document, "main")?;
        let weather = document
            .get("weather")
            .and_then(Value::as_array)
            .ok_or(MalformedPayload::MissingSection("weather"))?;

        let first = weather.first().ok_or(MalformedPayload::EmptyWeather)?;
        let situation_code = first
            .as_object()
            .ok_or(MalformedPayload::InvalidWeatherEntry)?
            .get("id")
            .and_then(|id| id.as_i64().or_else(|| id.as_f64().map(|f| f as i64)))
            .unwrap_or(0);

        let sunrise_epoch = Self::number_or_zero(sys, "sunrise");
        let sunrise = Self::epoch_to_time_of_day(sunrise_epoch, tz).ok_or(
            MalformedPayload::InvalidTimestamp {
                path: "sys.sunrise",
                value: sunrise_epoch,
            },
        )?;

        let sunset_epoch = Self::number_or_zero(sys, "sunset");
        let sunset = Self::epoch_to_time_of_day(sunset_epoch, tz).ok_or(
            MalformedPayload::InvalidTimestamp {
                path: "sys.sunset",
                value: sunset_epoch,
            },
        )?;

        let snapshot = Snapshot {
            situation_code,
            temperature_celsius: Self::number_or_zero(main, "temp"),
            humidity_percent: Self::number_or_zero(main, "humidity"),
            sunrise,
            sunset,
        };

        debug!("Parsed weather payload: {:?}", snapshot);

        Ok(snapshot)
    }

    /// Converts UTC epoch seconds to the time of day in `tz`, discarding the date
    pub fn epoch_to_time_of_day<Tz: TimeZone>(epoch_secs: f64, tz: &Tz) -> Option<NaiveTime> {
        if !epoch_secs.is_finite() {
            return None;
        }

        let whole = epoch_secs.floor();
        if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
            return None;
        }
        let nanos = ((epoch_secs - whole) * 1_000_000_000.0) as u32;

        DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
            .map(|utc| utc.with_timezone(tz).time())
    }

    fn section<'a>(
        document: &'a Value,
        name: &'static str,
    ) -> Result<&'a Map<String, Value>, MalformedPayload> {
        document
            .get(name)
            .and_then(Value::as_object)
            .ok_or(MalformedPayload::MissingSection(name))
    }

    fn number_or_zero(section: &Map<String, Value>, key: &str) -> f64 {
        section.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }
}

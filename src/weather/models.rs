use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// The authoritative current weather state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Snapshot {
    /// Provider-defined weather condition code
    pub situation_code: i64,

    /// Temperature in degrees Celsius
    pub temperature_celsius: f64,

    /// Relative humidity in percent
    pub humidity_percent: f64,

    /// Local time of sunrise
    #[serde(with = "time_of_day")]
    pub sunrise: NaiveTime,

    /// Local time of sunset
    #[serde(with = "time_of_day")]
    pub sunset: NaiveTime,
}

/// Snapshot plus the fetch bookkeeping exposed alongside it
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StationState {
    pub snapshot: Snapshot,

    /// Most recent fetch that completed, or override that was applied
    pub last_fetched: Option<DateTime<Utc>>,

    /// Most recent fetch whose payload differed from the previous one
    pub last_changed: Option<DateTime<Utc>>,
}

/// Status document served on `GET /weatherStation`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationStatus {
    pub uri: String,
    pub situation: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub last_fetched: Option<DateTime<Utc>>,
    pub last_fetched_different_response: Option<DateTime<Utc>>,
    #[serde(with = "time_of_day")]
    pub sunrise: NaiveTime,
    #[serde(with = "time_of_day")]
    pub sunset: NaiveTime,
}

impl StationStatus {
    pub fn new(uri: &str, state: &StationState) -> Self {
        Self {
            uri: uri.to_string(),
            situation: state.snapshot.situation_code,
            temperature: state.snapshot.temperature_celsius,
            humidity: state.snapshot.humidity_percent,
            last_fetched: state.last_fetched,
            last_fetched_different_response: state.last_changed,
            sunrise: state.snapshot.sunrise,
            sunset: state.snapshot.sunset,
        }
    }
}

/// Manual replacement of the snapshot, accepted on `POST /weatherStation`
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotOverride {
    pub situation: i64,
    pub temperature: f64,
    pub humidity: f64,
    #[serde(with = "time_of_day")]
    pub sunrise: NaiveTime,
    #[serde(with = "time_of_day")]
    pub sunset: NaiveTime,
}

impl From<SnapshotOverride> for Snapshot {
    fn from(value: SnapshotOverride) -> Self {
        Self {
            situation_code: value.situation,
            temperature_celsius: value.temperature,
            humidity_percent: value.humidity,
            sunrise: value.sunrise,
            sunset: value.sunset,
        }
    }
}

/// Whether it is currently day, given the sunrise and sunset of the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Daylight {
    #[serde(with = "time_of_day")]
    pub now: NaiveTime,
    #[serde(with = "time_of_day")]
    pub sunrise: NaiveTime,
    #[serde(with = "time_of_day")]
    pub sunset: NaiveTime,
    pub is_day: bool,
}

impl Daylight {
    pub fn new(now: NaiveTime, sunrise: NaiveTime, sunset: NaiveTime) -> Self {
        // A sunset before sunrise means the day wraps past midnight.
        let is_day = if sunrise <= sunset {
            sunrise <= now && now < sunset
        } else {
            now >= sunrise || now < sunset
        };

        Self {
            now,
            sunrise,
            sunset,
            is_day,
        }
    }
}

/// Parses a time-of-day string such as `06:30:00`, `06:30:00.250` or `06:30`
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, chrono::ParseError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
}

/// Serde adapter rendering [`NaiveTime`] as `HH:MM:SS`
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::constants::time::TIME_OF_DAY_FORMAT;

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(TIME_OF_DAY_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_time_of_day(&raw)
            .map_err(|e| de::Error::custom(format!("invalid time of day '{raw}': {e}")))
    }
}

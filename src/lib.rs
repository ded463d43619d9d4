//! Weather station daemon
//!
//! Polls a weather provider on a fixed cadence, keeps the last good payload
//! on disk, and serves the current snapshot over HTTP while accepting
//! manual overrides.

pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod metrics;
pub mod station;
pub mod weather;

#[cfg(test)]
pub mod test_utils;

pub use error::StationError;
pub use station::WeatherStation;

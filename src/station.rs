//! Weather station engine assembly
//!
//! Wires the fetcher, persistence adapter and snapshot store together,
//! restores the last good payload on startup and spawns the poll loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::ApiState;
use crate::config::WeatherStationConfig;
use crate::error::StationError;
use crate::metrics::{PayloadOrigin, StationMetrics};
use crate::weather::{
    Fetcher, PayloadParser, PersistenceAdapter, Snapshot, SnapshotStore, WeatherMonitor,
    WeatherSource,
};

/// The assembled weather station
pub struct WeatherStation {
    source: Arc<dyn WeatherSource>,
    store: Arc<SnapshotStore>,
    persistence: Arc<PersistenceAdapter>,
    poll_interval: Duration,
}

impl WeatherStation {
    /// Builds the station from configuration, restoring any persisted payload
    pub async fn from_config(config: &WeatherStationConfig) -> Result<Self, StationError> {
        let fetcher = build_fetcher(config)?;
        let persistence = PersistenceAdapter::new(config.storage.persisted_file_path());

        info!(
            "Weather station at lat={}, lon={} persisting to {}",
            config.station.latitude,
            config.station.longitude,
            persistence.path().display()
        );

        Ok(Self::new(
            Arc::new(fetcher),
            persistence,
            Duration::from_secs(config.station.poll_interval_secs),
        )
        .await)
    }

    /// Builds the station around an arbitrary weather source
    pub async fn new(
        source: Arc<dyn WeatherSource>,
        persistence: PersistenceAdapter,
        poll_interval: Duration,
    ) -> Self {
        let store = match restore_snapshot(&persistence).await {
            Some(snapshot) => {
                StationMetrics::set_snapshot(&snapshot);
                SnapshotStore::with_snapshot(snapshot)
            }
            None => SnapshotStore::new(),
        };

        Self {
            source,
            store: Arc::new(store),
            persistence: Arc::new(persistence),
            poll_interval,
        }
    }

    pub fn store(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.store)
    }

    pub fn source_url(&self) -> &str {
        self.source.source_url()
    }

    /// State for the HTTP API, sharing this station's store
    pub fn api_state(&self, expose_metrics: bool) -> Arc<ApiState> {
        Arc::new(ApiState::new(self.store(), self.source_url()).with_metrics(expose_metrics))
    }

    /// Creates a poll loop bound to this station
    pub fn monitor(&self) -> WeatherMonitor {
        WeatherMonitor::new(
            Arc::clone(&self.source),
            Arc::clone(&self.store),
            Arc::clone(&self.persistence),
            self.poll_interval,
        )
    }

    /// Spawns the poll loop on its own task; it runs until the process exits
    pub fn start(&self) -> JoinHandle<()> {
        let monitor = self.monitor();

        tokio::spawn(async move {
            info!("Spawning weather monitor task");
            monitor.start().await;
        })
    }
}

/// Builds the HTTP fetcher for the configured provider
pub fn build_fetcher(config: &WeatherStationConfig) -> Result<Fetcher, StationError> {
    let api_key = config.station.resolve_api_key()?;
    let url = config.station.source_url(&api_key)?;

    Ok(Fetcher::new(
        url,
        Duration::from_secs(config.station.request_timeout_secs),
    )?)
}

/// Performs a single fetch and parses the payload, without touching any state
pub async fn fetch_snapshot(source: &dyn WeatherSource) -> Result<Snapshot, StationError> {
    let raw = source.fetch().await?;
    Ok(PayloadParser::parse(&raw)?)
}

/// Loads the persisted payload and parses it into a snapshot
///
/// A file that does not parse is deleted so it cannot fail every future
/// startup. A file that cannot be read is left in place.
pub async fn restore_snapshot(persistence: &PersistenceAdapter) -> Option<Snapshot> {
    let raw = match persistence.load().await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("No persisted weather values found");
            return None;
        }
        Err(e) => {
            StationMetrics::record_persistence_error("read");
            warn!("Unable to read persisted weather station values: {}", e);
            return None;
        }
    };

    match PayloadParser::parse(&raw) {
        Ok(snapshot) => {
            info!(
                "Restored persisted weather: situation={}, temperature={}, humidity={}",
                snapshot.situation_code, snapshot.temperature_celsius, snapshot.humidity_percent
            );
            Some(snapshot)
        }
        Err(e) => {
            StationMetrics::record_parse_error(PayloadOrigin::Persisted);
            warn!("Unable to load persisted weather station values: {}", e);

            if let Err(e) = persistence.delete().await {
                StationMetrics::record_persistence_error("delete");
                warn!("Unable to delete corrupt weather station values: {}", e);
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ScriptedSource, SAMPLE_PAYLOAD};
    use tempfile::TempDir;

    fn adapter(dir: &TempDir) -> PersistenceAdapter {
        PersistenceAdapter::new(dir.path().join("WeatherStationValues.json"))
    }

    #[tokio::test]
    async fn test_restore_valid_payload() {
        let dir = TempDir::new().unwrap();
        let persistence = adapter(&dir);
        persistence.save(SAMPLE_PAYLOAD).await.unwrap();

        let snapshot = restore_snapshot(&persistence).await;

        assert_eq!(snapshot, Some(PayloadParser::parse(SAMPLE_PAYLOAD).unwrap()));
        assert!(persistence.path().exists());
    }

    #[tokio::test]
    async fn test_restore_corrupt_payload_deletes_file() {
        let dir = TempDir::new().unwrap();
        let persistence = adapter(&dir);
        persistence.save("{ this is not json").await.unwrap();

        assert_eq!(restore_snapshot(&persistence).await, None);
        assert!(!persistence.path().exists());

        // A second startup finds nothing and stays quiet
        assert_eq!(restore_snapshot(&persistence).await, None);
    }

    #[tokio::test]
    async fn test_restore_unreadable_file_is_kept() {
        let dir = TempDir::new().unwrap();
        // A directory in place of the file fails to read without being corrupt content
        let path = dir.path().join("WeatherStationValues.json");
        std::fs::create_dir(&path).unwrap();
        let persistence = PersistenceAdapter::new(&path);

        assert_eq!(restore_snapshot(&persistence).await, None);
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_fetch_snapshot_parses_payload() {
        let source = ScriptedSource::new().respond(SAMPLE_PAYLOAD);

        let snapshot = fetch_snapshot(&source).await.unwrap();

        assert_eq!(snapshot, PayloadParser::parse(SAMPLE_PAYLOAD).unwrap());
    }

    #[tokio::test]
    async fn test_fetch_snapshot_reports_http_failure() {
        let source = ScriptedSource::new().fail(401);

        let result = fetch_snapshot(&source).await;

        assert!(matches!(
            result,
            Err(StationError::Fetch(crate::weather::FetchError::HttpError(401)))
        ));
    }

    #[tokio::test]
    async fn test_fetch_snapshot_reports_malformed_payload() {
        let source = ScriptedSource::new().respond("{ not json");

        let result = fetch_snapshot(&source).await;

        assert!(matches!(result, Err(StationError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_station_seeds_store_without_timestamps() {
        let dir = TempDir::new().unwrap();
        let persistence = adapter(&dir);
        persistence.save(SAMPLE_PAYLOAD).await.unwrap();

        let station = WeatherStation::new(
            Arc::new(ScriptedSource::new()),
            persistence,
            Duration::from_secs(5),
        )
        .await;

        let state = station.store().current().await;
        assert_eq!(state.snapshot.situation_code, 800);
        assert_eq!(state.last_fetched, None);
        assert_eq!(state.last_changed, None);
    }

    #[tokio::test]
    async fn test_api_state_shares_store() {
        let dir = TempDir::new().unwrap();
        let station = WeatherStation::new(
            Arc::new(ScriptedSource::new()),
            adapter(&dir),
            Duration::from_secs(5),
        )
        .await;

        let state = station.api_state(true);
        assert!(Arc::ptr_eq(&state.store, &station.store()));
        assert_eq!(state.source_url, station.source_url());
        assert!(state.expose_metrics);
    }
}

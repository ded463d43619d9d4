use super::fetcher::WeatherSource;
use super::parser::PayloadParser;
use super::persistence::PersistenceAdapter;
use super::store::SnapshotStore;
use crate::metrics::{PayloadOrigin, StationMetrics};
use chrono::Utc;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

/// Result of a single poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The provider could not be reached; nothing was updated
    FetchFailed,
    /// The payload was byte-identical to the previous one
    Unchanged,
    /// A changed payload was parsed and replaced the snapshot
    Updated,
    /// A changed payload was malformed; the previous snapshot was kept
    Rejected,
}

/// Polls the weather provider forever, updating the snapshot store on change
pub struct WeatherMonitor {
    source: Arc<dyn WeatherSource>,
    store: Arc<SnapshotStore>,
    persistence: Arc<PersistenceAdapter>,
    poll_interval: Duration,
    last_raw_payload: Option<String>,
}

impl WeatherMonitor {
    /// Creates a new WeatherMonitor; the first poll always treats its payload as changed
    pub fn new(
        source: Arc<dyn WeatherSource>,
        store: Arc<SnapshotStore>,
        persistence: Arc<PersistenceAdapter>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            source,
            store,
            persistence,
            poll_interval,
            last_raw_payload: None,
        }
    }

    /// Starts polling
    /// This runs indefinitely, sleeping the poll interval after every cycle
    pub async fn start(mut self) {
        info!(
            "Starting weather monitor with {}s interval",
            self.poll_interval.as_secs_f64()
        );

        loop {
            let cycle = AssertUnwindSafe(self.poll_once()).catch_unwind().await;
            if let Err(panic) = cycle {
                error!(
                    "Weather poll cycle panicked: {}",
                    panic_message(panic.as_ref())
                );
            }

            sleep(self.poll_interval).await;
        }
    }

    /// Performs a single fetch-compare-update cycle
    pub async fn poll_once(&mut self) -> PollOutcome {
        let raw = match self.source.fetch().await {
            Ok(raw) => raw,
            Err(e) => {
                StationMetrics::record_fetch(false, Utc::now());
                if e.is_timeout() {
                    warn!("Could not fetch weather information (timed out): {}", e);
                } else {
                    warn!("Could not fetch weather information: {}", e);
                }
                return PollOutcome::FetchFailed;
            }
        };

        let now = Utc::now();
        StationMetrics::record_fetch(true, now);

        if self.last_raw_payload.as_deref() == Some(raw.as_str()) {
            debug!("Weather payload unchanged since last fetch");
            self.store.record_fetch(now).await;
            return PollOutcome::Unchanged;
        }

        StationMetrics::record_payload_change();

        let outcome = match PayloadParser::parse(&raw) {
            Ok(snapshot) => {
                if let Err(e) = self.persistence.save(&raw).await {
                    StationMetrics::record_persistence_error("write");
                    warn!("Could not persist weather payload: {}", e);
                }

                self.store.record_change(snapshot, now).await;
                StationMetrics::set_snapshot(&snapshot);

                info!(
                    "Weather updated: situation={}, temperature={}, humidity={}, sunrise={}, sunset={}",
                    snapshot.situation_code,
                    snapshot.temperature_celsius,
                    snapshot.humidity_percent,
                    snapshot.sunrise,
                    snapshot.sunset
                );
                PollOutcome::Updated
            }
            Err(e) => {
                StationMetrics::record_parse_error(PayloadOrigin::Live);
                warn!("Discarding malformed weather payload: {}", e);
                self.store.record_fetch(now).await;
                PollOutcome::Rejected
            }
        };

        self.last_raw_payload = Some(raw);
        outcome
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

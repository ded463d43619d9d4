use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::models::{Snapshot, StationState};

/// Shared holder of the current snapshot and its fetch timestamps
///
/// Every update replaces the affected fields under a single write lock, so
/// readers always see a complete [`StationState`].
#[derive(Debug, Default)]
pub struct SnapshotStore {
    state: RwLock<StationState>,
}

impl SnapshotStore {
    /// Creates a store holding default (zero) values
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a previously persisted snapshot
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            state: RwLock::new(StationState {
                snapshot,
                ..StationState::default()
            }),
        }
    }

    /// Returns a copy of the current state
    pub async fn current(&self) -> StationState {
        *self.state.read().await
    }

    /// Returns a copy of the current snapshot
    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.snapshot
    }

    /// Records a completed fetch that did not change the snapshot
    pub async fn record_fetch(&self, at: DateTime<Utc>) {
        self.state.write().await.last_fetched = Some(at);
    }

    /// Replaces the snapshot after a changed payload parsed successfully
    pub async fn record_change(&self, snapshot: Snapshot, at: DateTime<Utc>) {
        let mut state = self.state.write().await;
        state.snapshot = snapshot;
        state.last_fetched = Some(at);
        state.last_changed = Some(at);
    }

    /// Replaces the snapshot with a manual override
    pub async fn apply_override(&self, snapshot: Snapshot, at: DateTime<Utc>) {
        let mut state = self.state.write().await;
        state.snapshot = snapshot;
        state.last_fetched = Some(at);
    }
}

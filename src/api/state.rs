//! Shared state handed to every API handler.

use std::sync::Arc;

use crate::weather::SnapshotStore;

/// State shared between the HTTP handlers.
///
/// The store is the same instance the poll loop writes to; handlers never
/// hold its lock across an await.
#[derive(Debug)]
pub struct ApiState {
    /// The current snapshot and fetch timestamps.
    pub store: Arc<SnapshotStore>,
    /// Provider URL reported in the status document.
    pub source_url: String,
    /// Whether `GET /metrics` is routed.
    pub expose_metrics: bool,
}

impl ApiState {
    pub fn new(store: Arc<SnapshotStore>, source_url: impl Into<String>) -> Self {
        Self {
            store,
            source_url: source_url.into(),
            expose_metrics: false,
        }
    }

    /// Enable or disable the metrics endpoint.
    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.expose_metrics = enabled;
        self
    }
}

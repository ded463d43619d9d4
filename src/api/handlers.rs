//! Endpoint handlers for the weather station API.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/weatherStation` | Current snapshot, fetch timestamps and source URL |
//! | `POST` | `/weatherStation` | Replace the snapshot with manual values |
//! | `GET` | `/weatherStation/daylight` | Whether it is day at the station |
//! | `GET` | `/metrics` | Prometheus metrics (when enabled) |

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Local, Utc};
use tracing::info;

use crate::api::error::ApiError;
use crate::api::state::ApiState;
use crate::metrics::{render_metrics, StationMetrics, METRICS_CONTENT_TYPE};
use crate::weather::{Daylight, Snapshot, SnapshotOverride, StationStatus};

/// Return the current snapshot with its fetch timestamps.
pub async fn get_status(State(state): State<Arc<ApiState>>) -> Json<StationStatus> {
    let current = state.store.current().await;
    Json(StationStatus::new(&state.source_url, &current))
}

/// Replace the whole snapshot with the values in the request body.
///
/// Malformed bodies are rejected with `400 Bad Request` and leave the
/// snapshot untouched.
pub async fn post_override(
    State(state): State<Arc<ApiState>>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let request: SnapshotOverride = serde_json::from_slice(&body)?;
    let snapshot = Snapshot::from(request);

    state.store.apply_override(snapshot, Utc::now()).await;
    StationMetrics::record_override();
    StationMetrics::set_snapshot(&snapshot);

    info!(
        "Weather overridden: situation={}, temperature={}, humidity={}, sunrise={}, sunset={}",
        snapshot.situation_code,
        snapshot.temperature_celsius,
        snapshot.humidity_percent,
        snapshot.sunrise,
        snapshot.sunset
    );

    Ok(StatusCode::OK)
}

/// Report whether the local time lies between sunrise and sunset.
pub async fn get_daylight(State(state): State<Arc<ApiState>>) -> Json<Daylight> {
    let snapshot = state.store.snapshot().await;
    Json(Daylight::new(
        Local::now().time(),
        snapshot.sunrise,
        snapshot.sunset,
    ))
}

/// Render Prometheus metrics in the text exposition format.
pub async fn get_metrics() -> Result<impl IntoResponse, ApiError> {
    let body = render_metrics().map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], body))
}

//! Axum router construction for the weather station API.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::api::state::ApiState;
use crate::constants::api::{DAYLIGHT_PATH, METRICS_PATH, WEATHER_STATION_PATH};

/// Build the complete Axum router.
///
/// - `GET /weatherStation` -- current status
/// - `POST /weatherStation` -- manual override
/// - `GET /weatherStation/daylight` -- daylight view
/// - `GET /metrics` -- Prometheus metrics, only when enabled in the state
pub fn build_router(state: Arc<ApiState>) -> Router {
    let mut router = Router::new()
        .route(
            WEATHER_STATION_PATH,
            get(handlers::get_status).post(handlers::post_override),
        )
        .route(DAYLIGHT_PATH, get(handlers::get_daylight));

    if state.expose_metrics {
        router = router.route(METRICS_PATH, get(handlers::get_metrics));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

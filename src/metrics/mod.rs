pub mod server;
pub mod station_metrics;

pub use server::{render_metrics, METRICS_CONTENT_TYPE};
pub use station_metrics::{PayloadOrigin, StationMetrics};

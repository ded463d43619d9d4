pub mod fetcher;
pub mod models;
pub mod monitor;
pub mod parser;
pub mod persistence;
pub mod store;

pub use fetcher::{FetchError, Fetcher, WeatherSource};
pub use models::{Daylight, Snapshot, SnapshotOverride, StationState, StationStatus};
pub use monitor::{PollOutcome, WeatherMonitor};
pub use parser::{MalformedPayload, PayloadParser};
pub use persistence::{PersistenceAdapter, PersistenceError};
pub use store::SnapshotStore;

//! HTTP API serving the snapshot store.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::{ApiError, ServerError};
pub use router::build_router;
pub use server::start_server;
pub use state::ApiState;

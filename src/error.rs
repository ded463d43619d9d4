use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::parser::ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crate::weather::FetchError),

    #[error("Malformed payload: {0}")]
    Malformed(#[from] crate::weather::MalformedPayload),
}

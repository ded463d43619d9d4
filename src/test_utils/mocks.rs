//! Mock implementations for testing

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::weather::{FetchError, WeatherSource};

/// Weather source replaying a fixed script of responses
///
/// Once the script is exhausted every fetch fails with HTTP 503.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    responses: Mutex<VecDeque<Result<String, u16>>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful response
    pub fn respond(self, body: impl Into<String>) -> Self {
        self.push(Ok(body.into()));
        self
    }

    /// Queue a failed response with the given HTTP status
    pub fn fail(self, status: u16) -> Self {
        self.push(Err(status));
        self
    }

    /// Queue a response after construction
    pub fn push(&self, response: Result<String, u16>) {
        self.responses
            .lock()
            .expect("scripted source lock poisoned")
            .push_back(response);
    }
}

#[async_trait]
impl WeatherSource for ScriptedSource {
    async fn fetch(&self) -> Result<String, FetchError> {
        let next = self
            .responses
            .lock()
            .expect("scripted source lock poisoned")
            .pop_front();

        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(FetchError::HttpError(status)),
            None => Err(FetchError::HttpError(503)),
        }
    }

    fn source_url(&self) -> &str {
        "http://weather.test/data/2.5/weather?lat=0&lon=0"
    }
}

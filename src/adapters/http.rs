//! HTTP dataset source
//!
//! Fetches the dataset document with a blocking GET. A non-success status is
//! reported as [`LoadError::BadStatus`]; anything that stops the request from
//! completing is a [`LoadError::NetworkFailure`].

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};

use crate::core::ports::{DatasetSource, LoadError};

/// Request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Dataset served over http(s)
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    /// Source fetching `url`
    pub fn new(url: impl Into<String>) -> Result<Self, LoadError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LoadError::NetworkFailure(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl DatasetSource for HttpSource {
    fn fetch(&self) -> Result<Vec<u8>, LoadError> {
        debug!("GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, format!("qtrack/{}", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| LoadError::NetworkFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::BadStatus(status.as_u16()));
        }

        response
            .bytes()
            .map(|body| body.to_vec())
            .map_err(|e| LoadError::NetworkFailure(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

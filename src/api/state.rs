//! Application state for the reporting API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::Config;

/// Per-page timeout for outbound Graph calls. The core pipeline itself
/// enforces no timeouts; this is boundary configuration on the client.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared application state.
///
/// Contains the process configuration and the reused outbound HTTP client.
/// Nothing here is mutated by requests; each batch allocates its own maps.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    http: Client,
}

impl AppState {
    /// Creates a new application state around the given configuration.
    pub fn new(config: Config) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client with rustls backend");

        Self {
            config: Arc::new(config),
            http,
        }
    }

    /// Returns the process configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the shared outbound HTTP client.
    pub fn http(&self) -> &Client {
        &self.http
    }
}

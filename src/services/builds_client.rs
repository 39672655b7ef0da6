//! Buildserver API client.
//!
//! Provides the HTTP client that fetches the build list.

use crate::config::ClientConfig;
use crate::error::AppError;
use crate::models::Build;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Buildserver API client configuration.
#[derive(Debug, Clone)]
pub struct BuildsClientConfig {
    /// Fully resolved build list URL (e.g., `http://localhost:8000/builds/`).
    pub endpoint: String,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl BuildsClientConfig {
    /// Resolve the builds endpoint from the application configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, AppError> {
        Ok(Self {
            endpoint: config.builds_endpoint()?,
            timeout_ms: config.timeout_ms,
        })
    }
}

/// Buildserver API client.
#[derive(Debug, Clone)]
pub struct BuildsClient {
    client: Client,
    config: BuildsClientConfig,
}

impl BuildsClient {
    /// Create a new client.
    pub fn new(config: BuildsClientConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// The URL this client fetches from.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    /// GET `url` and decode the whole body as JSON.
    ///
    /// The status code is not inspected: whatever body the server sends
    /// must itself decode as `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| tag_endpoint(e.into(), url))?;

        log::debug!("[builds] GET {} -> {}", url, response.status());

        let body = response
            .bytes()
            .await
            .map_err(|e| tag_endpoint(e.into(), url))?;

        serde_json::from_slice(&body)
            .map_err(|e| AppError::parse_at(format!("Failed to parse response: {}", e), url))
    }

    /// Fetch every build record, in the order the server returns them.
    pub async fn list_builds(&self) -> Result<Vec<Build>, AppError> {
        self.get_json(&self.config.endpoint).await
    }
}

/// Attach the endpoint to network/parse errors that lack one.
fn tag_endpoint(err: AppError, url: &str) -> AppError {
    match err {
        AppError::Network {
            message,
            endpoint: None,
        } => AppError::network_at(message, url),
        AppError::Parse {
            message,
            endpoint: None,
        } => AppError::parse_at(message, url),
        other => other,
    }
}

//! Client configuration.
//!
//! The configuration object supplies the API host and a table of route
//! fragments, mirroring the frontend config the buildserver ships with:
//!
//! ```json
//! {
//!   "API_HOSTNAME": "http://localhost:8000/",
//!   "routes": { "builds": "builds/" },
//!   "timeout_ms": 30000,
//!   "rows_per_page": 5,
//!   "rows_per_page_options": [5, 10, 25, -1]
//! }
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use crate::error::AppError;
use crate::models::pagination::{default_rows_per_page_options, DEFAULT_ROWS_PER_PAGE};
use crate::models::RowsPerPage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Configuration file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "buildboard.json";

/// Route table key of the build list endpoint.
pub const BUILDS_ROUTE_KEY: &str = "builds";

/// API host used when nothing else is configured.
pub const DEFAULT_API_HOSTNAME: &str = "http://localhost:8000/";

/// Route of the build list used when nothing else is configured.
pub const DEFAULT_BUILDS_ROUTE: &str = "builds/";

/// Request timeout default in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Route key to path fragment, e.g. `builds` -> `builds/`.
pub type RouteTable = BTreeMap<String, String>;

fn default_routes() -> RouteTable {
    let mut routes = RouteTable::new();
    routes.insert(BUILDS_ROUTE_KEY.to_string(), DEFAULT_BUILDS_ROUTE.to_string());
    routes
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the buildserver API.
    #[serde(rename = "API_HOSTNAME")]
    pub api_hostname: String,

    /// Route fragments appended to the host.
    pub routes: RouteTable,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// Initial page size.
    pub rows_per_page: RowsPerPage,

    /// Page sizes the pagination control offers.
    pub rows_per_page_options: Vec<RowsPerPage>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_hostname: DEFAULT_API_HOSTNAME.to_string(),
            routes: default_routes(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            rows_per_page_options: default_rows_per_page_options(),
        }
    }
}

/// Join `host` and the route stored under `key` into an endpoint URL.
///
/// Exactly one `/` separates host and route; the route's own trailing
/// slash is kept.
pub fn resolve_endpoint(host: &str, routes: &RouteTable, key: &str) -> Result<String, AppError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(AppError::config_key("API host is empty", "API_HOSTNAME"));
    }

    let route = routes.get(key).ok_or_else(|| {
        AppError::config_key(format!("No route configured for '{}'", key), format!("routes.{}", key))
    })?;

    let endpoint = format!(
        "{}/{}",
        host.trim_end_matches('/'),
        route.trim().trim_start_matches('/')
    );

    reqwest::Url::parse(&endpoint).map_err(|e| {
        AppError::config_key(format!("Invalid endpoint '{}': {}", endpoint, e), "API_HOSTNAME")
    })?;

    Ok(endpoint)
}

impl ClientConfig {
    /// Parse a configuration document.
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| AppError::config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&contents)
    }

    /// Load from `path` if given, otherwise from [`DEFAULT_CONFIG_FILE`] in
    /// the working directory if it exists, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(path) => {
                log::info!("[config] Loading {}", path.display());
                Self::from_file(path)
            }
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    log::info!("[config] Loading {}", fallback.display());
                    Self::from_file(fallback)
                } else {
                    log::debug!("[config] No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Replace the host and/or builds route, e.g. from the command line.
    pub fn with_overrides(mut self, api_hostname: Option<String>, builds_route: Option<String>) -> Self {
        if let Some(host) = api_hostname {
            self.api_hostname = host;
        }
        if let Some(route) = builds_route {
            self.routes.insert(BUILDS_ROUTE_KEY.to_string(), route);
        }
        self
    }

    /// Check the settings that cannot be expressed in the types.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_ms == 0 {
            return Err(AppError::config_key("Timeout must be positive", "timeout_ms"));
        }
        if self.rows_per_page_options.is_empty() {
            return Err(AppError::config_key(
                "At least one page size option is required",
                "rows_per_page_options",
            ));
        }
        if !self.rows_per_page_options.contains(&self.rows_per_page) {
            return Err(AppError::config_key(
                format!("Rows per page {} is not one of the options", self.rows_per_page),
                "rows_per_page",
            ));
        }
        Ok(())
    }

    /// The build list endpoint.
    pub fn builds_endpoint(&self) -> Result<String, AppError> {
        resolve_endpoint(&self.api_hostname, &self.routes, BUILDS_ROUTE_KEY)
    }
}

//! OSRM-backed distance oracle and directions provider.
//!
//! [`OsrmClient`] answers [`DistanceOracle`] queries from OSRM's Table
//! service and [`DirectionsProvider`] queries from its Route service. Both
//! traits are synchronous, so the client blocks on an owned Tokio runtime.
//!
//! # Example
//!
//! ```no_run
//! use geo::Coord;
//! use pubcrawl_core::DistanceOracle;
//! use pubcrawl_data::routing::OsrmClient;
//!
//! let client = OsrmClient::new("http://localhost:5005")?;
//! let table = client.distance_table(&[
//!     Coord { x: -2.5935, y: 51.4508 },
//!     Coord { x: -2.5921, y: 51.4512 },
//! ])?;
//! assert_eq!(table.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::future::Future;
use std::time::Duration;

use geo::{Coord, LineString};
use log::debug;
use pubcrawl_core::{DirectionsProvider, DistanceError, DistanceOracle, LegStep, RouteLeg};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::osrm::{OsrmRoute, RouteResponse, TableResponse};

/// Error type for [`OsrmClient`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Default OSRM endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5005";

/// Default OSRM profile for walking.
pub const DEFAULT_PROFILE: &str = "foot";

/// Default user agent for OSRM requests.
pub const DEFAULT_USER_AGENT: &str = "pubcrawl-routing/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`OsrmClient`].
#[derive(Debug, Clone)]
pub struct OsrmClientConfig {
    /// Base URL for the OSRM service (e.g., `"http://localhost:5005"`).
    pub base_url: String,
    /// Routing profile path segment, e.g. `"foot"`.
    pub profile: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for OsrmClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            profile: DEFAULT_PROFILE.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl OsrmClientConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the routing profile.
    #[must_use]
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP client for a walking-profile OSRM instance.
///
/// The client owns a `current_thread` Tokio runtime reused across calls.
/// When invoked from inside a multi-threaded Tokio runtime it borrows that
/// runtime through [`tokio::task::block_in_place`] instead, which avoids
/// nested runtime panics. Inside a `current_thread` runtime it falls back to
/// its own runtime, which may deadlock if the caller's runtime drives IO
/// this request depends on.
///
/// Distances are requested with `annotations=distance`; unreachable pairs
/// come back as [`f64::INFINITY`]. No request is retried.
pub struct OsrmClient {
    client: Client,
    config: OsrmClientConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for OsrmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsrmClient")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl OsrmClient {
    /// Create a client with the default configuration for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmClientConfig::new(base_url))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: OsrmClientConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &OsrmClientConfig {
        &self.config
    }

    fn service_url(&self, service: &str, coords: &[Coord<f64>]) -> String {
        let path = coords
            .iter()
            .map(|coord| format!("{},{}", coord.x, coord.y))
            .collect::<Vec<_>>()
            .join(";");
        format!(
            "{}/{service}/v1/{}/{path}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        )
    }

    /// Build the Table service URL; coordinates are `lon,lat` pairs.
    fn table_url(&self, coords: &[Coord<f64>]) -> String {
        format!("{}?annotations=distance", self.service_url("table", coords))
    }

    /// Build the Route service URL for a single leg.
    fn route_url(&self, from: Coord<f64>, to: Coord<f64>) -> String {
        format!(
            "{}?overview=full&steps=true&geometries=geojson",
            self.service_url("route", &[from, to])
        )
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DistanceError> {
        debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, url))?;

        response.json().await.map_err(|err| DistanceError::Parse {
            message: err.to_string(),
        })
    }

    /// Convert a reqwest error to a `DistanceError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> DistanceError {
        if error.is_timeout() {
            return DistanceError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return DistanceError::Http {
                url: url.to_owned(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        DistanceError::Network {
            url: url.to_owned(),
            message: error.to_string(),
        }
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

/// Convert a Table response into an `expected x expected` distance table.
///
/// Null, negative and non-finite cells mark unreachable pairs.
fn convert_table(
    response: TableResponse,
    expected: usize,
) -> Result<Vec<Vec<f64>>, DistanceError> {
    if !response.is_ok() {
        return Err(DistanceError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let distances = response.distances.ok_or_else(|| DistanceError::Parse {
        message: "OSRM response missing distances array".to_owned(),
    })?;
    if distances.len() != expected {
        return Err(DistanceError::LengthMismatch {
            expected,
            actual: distances.len(),
        });
    }

    distances
        .into_iter()
        .map(|row| {
            if row.len() != expected {
                return Err(DistanceError::LengthMismatch {
                    expected,
                    actual: row.len(),
                });
            }
            Ok(row
                .into_iter()
                .map(|cell| {
                    cell.filter(|&meters| meters >= 0.0 && meters.is_finite())
                        .unwrap_or(f64::INFINITY)
                })
                .collect())
        })
        .collect()
}

/// Convert a Route response into the leg it describes.
fn convert_route(response: RouteResponse) -> Result<RouteLeg, DistanceError> {
    if !response.is_ok() {
        return Err(DistanceError::Service {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let OsrmRoute {
        distance,
        duration,
        geometry,
        legs,
    } = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| DistanceError::Parse {
            message: "OSRM response contains no routes".to_owned(),
        })?;

    let steps = legs
        .into_iter()
        .flat_map(|leg| leg.steps)
        .map(|step| LegStep {
            name: step.name,
            maneuver: step.maneuver.kind,
            modifier: step.maneuver.modifier,
            distance_meters: step.distance,
            duration_seconds: step.duration,
        })
        .collect();
    let geometry: LineString<f64> = geometry
        .coordinates
        .into_iter()
        .map(|[x, y]| Coord { x, y })
        .collect();

    Ok(RouteLeg {
        distance_meters: distance,
        duration_seconds: duration,
        steps,
        geometry,
    })
}

impl DistanceOracle for OsrmClient {
    fn distance_table(&self, coords: &[Coord<f64>]) -> Result<Vec<Vec<f64>>, DistanceError> {
        if coords.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        let url = self.table_url(coords);
        let response: TableResponse = self.block_on(self.fetch_json(&url))?;
        convert_table(response, coords.len())
    }
}

impl DirectionsProvider for OsrmClient {
    fn directions(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, DistanceError> {
        let url = self.route_url(from, to);
        let response: RouteResponse = self.block_on(self.fetch_json(&url))?;
        convert_route(response)
    }
}

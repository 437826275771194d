//! Routing services backed by OSRM.
//!
//! [`OsrmClient`] implements the synchronous
//! [`DistanceOracle`](pubcrawl_core::DistanceOracle) and
//! [`DirectionsProvider`](pubcrawl_core::DirectionsProvider) traits over
//! OSRM's HTTP API.

mod osrm;
mod provider;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_PROFILE, DEFAULT_USER_AGENT, OsrmClient, OsrmClientConfig,
    ProviderBuildError,
};

//! Facade crate for the pub crawl planning engine.
//!
//! This crate re-exports the core domain types and exposes the planner, the
//! OSRM-backed routing client and artefact persistence behind feature flags.

#![forbid(unsafe_code)]

pub use pubcrawl_core::{
    Diagnostics, DirectionsProvider, DistanceError, DistanceMatrix, DistanceOracle, PlanError,
    PlanRequest, PlanResponse, PlanStatus, Planner, Pub, PubIndex, PubRegistry, Route,
    RouteElement, RouteLeg,
};

#[cfg(feature = "planner")]
pub use pubcrawl_planner::{CrawlPlanner, PlannerConfig, navigation_legs};

#[cfg(feature = "osrm")]
pub use pubcrawl_data::routing::{OsrmClient, OsrmClientConfig};

#[cfg(feature = "osrm")]
pub use pubcrawl_data::{
    LoadError, MatrixArtefact, PrecomputeError, load_matrix_for, load_pubs,
    precompute_distance_matrix, write_matrix_artefact,
};

//! Core domain types for the pub crawl planner.
//!
//! These types describe the registry of candidate venues, the routes built
//! through them and the collaborator traits the planner consumes: a dense
//! pub-to-pub [`DistanceMatrix`], a batched [`DistanceOracle`] for the legs
//! touching the caller's start and end, and a [`DirectionsProvider`] used to
//! annotate a finished route.
//!
//! Coordinates are WGS84 [`geo::Coord`] values with `x = longitude` and
//! `y = latitude`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod directions;
pub mod distance;
pub mod geometry;
mod planner;
mod registry;
mod route;
mod venue;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use directions::{DirectionsProvider, LegStep, RouteLeg};
pub use distance::{
    DistanceError, DistanceLookupError, DistanceMatrix, DistanceMatrixError, DistanceOracle,
};
pub use planner::{
    Diagnostics, PlanError, PlanRequest, PlanRequestValidationError, PlanResponse, PlanStatus,
    Planner, SearchStrategy, WALKING_SPEED_METERS_PER_MINUTE,
};
pub use registry::{PubIndex, PubRegistry, RegistryError};
pub use route::{Route, RouteElement, RouteError};
pub use venue::{Address, Pub};

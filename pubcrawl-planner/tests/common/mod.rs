//! Shared fixtures for the golden route tests.
//!
//! Each golden route is a small corridor stored as JSON under
//! `tests/golden_routes/data`. Venues are [`Pub`] records and the request is
//! a [`PlanRequest`], both in their serde form. Distances are planar, so the
//! expected totals can be checked by hand.

use std::fs;
use std::path::PathBuf;

use pubcrawl_core::test_support::{PlanarDistanceOracle, planar_matrix};
use pubcrawl_core::{PlanRequest, PlanResponse, PlanStatus, Pub, PubRegistry, SearchStrategy};
use pubcrawl_planner::CrawlPlanner;
use serde::Deserialize;

/// Tolerance for comparing walking distances, in meters.
pub const DISTANCE_TOLERANCE: f64 = 0.01;

/// Deserialised golden route test case.
#[derive(Debug, Deserialize, Clone)]
pub struct GoldenRoute {
    /// Name of the case, used in failure messages.
    pub name: String,
    /// What the case demonstrates.
    pub description: String,
    /// Venues in registry order.
    pub pubs: Vec<Pub>,
    /// Request to plan.
    pub request: PlanRequest,
    /// Expected outcome.
    pub expected: ExpectedRoute,
}

/// Expected outcome of a golden route.
#[derive(Debug, Deserialize, Clone)]
pub struct ExpectedRoute {
    /// Venue ids in visiting order.
    pub route_pub_ids: Vec<String>,
    /// Plan status.
    pub status: PlanStatus,
    /// Subset search that should run.
    pub strategy: SearchStrategy,
    /// Total walking distance in meters.
    pub total_distance_meters: f64,
}

impl GoldenRoute {
    /// Planner over this case's venues with planar distances.
    pub fn planner(&self) -> CrawlPlanner<PlanarDistanceOracle> {
        let registry = PubRegistry::new(self.pubs.clone()).unwrap_or_else(|e| {
            panic!("golden route {} has invalid venues: {e}", self.name)
        });
        let matrix = planar_matrix(&registry);
        CrawlPlanner::new(registry, matrix, PlanarDistanceOracle)
            .unwrap_or_else(|e| panic!("golden route {} builds no planner: {e}", self.name))
    }

    /// Venue ids visited by `response`, in order.
    pub fn visited_ids(&self, response: &PlanResponse) -> Vec<String> {
        response
            .route
            .pubs()
            .map(|index| {
                self.pubs
                    .get(index.get())
                    .map(|venue| venue.id.clone())
                    .unwrap_or_else(|| panic!("{}: route names unknown pub {index}", self.name))
            })
            .collect()
    }

    /// Whether `total` matches the expected distance.
    #[expect(clippy::float_arithmetic, reason = "distances compare within a tolerance")]
    pub fn distance_matches(&self, total: f64) -> bool {
        (total - self.expected.total_distance_meters).abs() <= DISTANCE_TOLERANCE
    }
}

/// Load a golden route from the data directory by name (without extension).
///
/// # Panics
///
/// Panics if the file cannot be read or parsed.
pub fn load_golden_route(name: &str) -> GoldenRoute {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden_routes/data")
        .join(format!("{name}.json"));
    let content = fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "failed to read golden route file at {}: {}",
            path.display(),
            e
        )
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        panic!(
            "failed to parse golden route JSON at {}: {}",
            path.display(),
            e
        )
    })
}

//! Test-only utilities for `pubcrawl-planner`.
//!
//! The helpers in this module are available to unit tests, behavioural tests
//! and benchmarks. They are gated behind the `test-support` feature (and
//! `cfg(test)`).

use geo::Coord;
use pubcrawl_core::test_support::{PlanarDistanceOracle, planar_matrix, registry_from_coords};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{CrawlPlanner, PlannerConfig};

/// Start of the synthetic corridor used by [`scattered_coords`].
pub const CORRIDOR_START: Coord<f64> = Coord { x: -2.60, y: 51.45 };

/// End of the synthetic corridor used by [`scattered_coords`].
pub const CORRIDOR_END: Coord<f64> = Coord { x: -2.58, y: 51.46 };

/// Build a planner over `coords` that measures straight lines.
///
/// # Panics
/// Panics if `config` is invalid.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use pubcrawl_planner::PlannerConfig;
/// use pubcrawl_planner::test_support::planar_planner;
///
/// let planner = planar_planner(&[Coord { x: 0.1, y: 0.0 }], PlannerConfig::default());
/// assert_eq!(planner.registry().len(), 1);
/// ```
#[must_use]
#[expect(clippy::expect_used, reason = "test helpers fail loudly on bad fixtures")]
pub fn planar_planner(
    coords: &[Coord<f64>],
    config: PlannerConfig,
) -> CrawlPlanner<PlanarDistanceOracle> {
    let registry = registry_from_coords(coords);
    let matrix = planar_matrix(&registry);
    CrawlPlanner::with_config(registry, matrix, PlanarDistanceOracle, config)
        .expect("planar fixtures are consistent")
}

/// Deterministically scatter `count` venues in a box around the corridor
/// from [`CORRIDOR_START`] to [`CORRIDOR_END`].
///
/// # Examples
/// ```rust
/// use pubcrawl_planner::test_support::scattered_coords;
///
/// assert_eq!(scattered_coords(30, 7), scattered_coords(30, 7));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "venue positions are offsets in degrees"
)]
pub fn scattered_coords(count: usize, seed: u64) -> Vec<Coord<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let margin = 0.005;
    let (min_x, max_x) = (
        CORRIDOR_START.x.min(CORRIDOR_END.x) - margin,
        CORRIDOR_START.x.max(CORRIDOR_END.x) + margin,
    );
    let (min_y, max_y) = (
        CORRIDOR_START.y.min(CORRIDOR_END.y) - margin,
        CORRIDOR_START.y.max(CORRIDOR_END.y) + margin,
    );
    (0..count)
        .map(|_| Coord {
            x: rng.gen_range(min_x..max_x),
            y: rng.gen_range(min_y..max_y),
        })
        .collect()
}

//! Planning requests, responses and the [`Planner`] trait.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::{DistanceError, DistanceLookupError, Route, RouteError};

/// Assumed walking pace used to turn distance into time.
pub const WALKING_SPEED_METERS_PER_MINUTE: f64 = 80.0;

const DEFAULT_UNIFORMITY_WEIGHT: f64 = 0.35;

/// Parameters for a planning request.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use pubcrawl_core::PlanRequest;
///
/// let request = PlanRequest {
///     start: Coord { x: -2.5970, y: 51.4545 },
///     end: Coord { x: -2.6000, y: 51.4200 },
///     count: 5,
///     uniformity_weight: 0.5,
///     seed: 7,
/// };
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRequest {
    /// Where the crawl begins.
    pub start: Coord<f64>,
    /// Where the crawl finishes.
    pub end: Coord<f64>,
    /// Number of venues to visit.
    pub count: usize,
    /// Preference for even spacing, from `0.0` (distance only) to `1.0`.
    #[cfg_attr(feature = "serde", serde(default = "default_uniformity_weight"))]
    pub uniformity_weight: f64,
    /// Seed for the randomised subset search.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
}

#[cfg(feature = "serde")]
const fn default_uniformity_weight() -> f64 {
    DEFAULT_UNIFORMITY_WEIGHT
}

/// Reasons a [`PlanRequest`] is rejected before any search starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanRequestValidationError {
    /// At least one venue must be requested.
    #[error("count must be at least 1")]
    ZeroCount,
    /// The uniformity weight lies outside `[0.0, 1.0]` or is NaN.
    #[error("uniformity weight must be between 0.0 and 1.0")]
    InvalidUniformityWeight,
    /// A coordinate is NaN or infinite.
    #[error("{field} coordinate must be finite")]
    NonFiniteCoordinate {
        /// `"start"` or `"end"`.
        field: &'static str,
    },
    /// More venues were requested than the registry holds.
    #[error("requested {requested} pubs but only {available} are available")]
    CountExceedsAvailable {
        /// Requested count.
        requested: usize,
        /// Registry size.
        available: usize,
    },
}

impl PlanRequest {
    /// Build a request with the default uniformity weight and seed zero.
    #[must_use]
    pub const fn new(start: Coord<f64>, end: Coord<f64>, count: usize) -> Self {
        Self {
            start,
            end,
            count,
            uniformity_weight: DEFAULT_UNIFORMITY_WEIGHT,
            seed: 0,
        }
    }

    /// Set the uniformity weight.
    #[must_use]
    pub const fn with_uniformity_weight(mut self, weight: f64) -> Self {
        self.uniformity_weight = weight;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check request parameters that do not depend on the registry.
    pub fn validate(&self) -> Result<(), PlanRequestValidationError> {
        if self.count == 0 {
            return Err(PlanRequestValidationError::ZeroCount);
        }
        if !(0.0..=1.0).contains(&self.uniformity_weight) {
            return Err(PlanRequestValidationError::InvalidUniformityWeight);
        }
        for (field, coord) in [("start", self.start), ("end", self.end)] {
            if !(coord.x.is_finite() && coord.y.is_finite()) {
                return Err(PlanRequestValidationError::NonFiniteCoordinate { field });
            }
        }
        Ok(())
    }

    /// Check the request against a registry holding `available` venues.
    pub fn validate_for(&self, available: usize) -> Result<(), PlanRequestValidationError> {
        self.validate()?;
        if self.count > available {
            return Err(PlanRequestValidationError::CountExceedsAvailable {
                requested: self.count,
                available,
            });
        }
        Ok(())
    }
}

/// How a plan relates to the forward-progress constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PlanStatus {
    /// The route visits the requested number of venues without backtracking.
    Complete,
    /// No sampled route satisfied the constraint; the route visits no venues.
    NoFeasibleRoute,
    /// The route visits the requested number of venues but backtracks beyond
    /// the tolerance.
    ProgressRelaxed,
}

impl PlanStatus {
    /// Whether the plan fell short of a complete, constraint-respecting route.
    #[must_use]
    pub const fn is_degraded(self) -> bool {
        !matches!(self, Self::Complete)
    }
}

/// Which subset search produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchStrategy {
    /// Random subsets, each constructed and refined.
    Sampling,
    /// One greedy construction followed by refinement.
    Greedy,
}

/// Statistics describing how a plan was found.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent planning.
    pub solve_time: Duration,
    /// Size of the corridor candidate set.
    pub candidates_considered: usize,
    /// Subset search that ran.
    pub strategy: SearchStrategy,
    /// Tours constructed and refined.
    pub tours_evaluated: usize,
    /// Tours that satisfied the forward-progress constraint.
    pub feasible_tours: usize,
}

/// Result of a successful planning call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResponse {
    /// Ordered route from start to end.
    pub route: Route,
    /// Total walking distance in meters.
    pub total_distance_meters: f64,
    /// Walking time at the configured pace, in minutes.
    pub estimated_time_minutes: f64,
    /// Count from the request.
    pub requested_count: usize,
    /// Whether the route meets the forward-progress constraint.
    pub status: PlanStatus,
    /// Search statistics.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`Planner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Request parameters were invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(#[from] PlanRequestValidationError),
    /// The distance oracle failed while fetching endpoint distances.
    #[error("failed to fetch endpoint distances: {0}")]
    Oracle(#[source] DistanceError),
    /// A route leg could not be resolved. This indicates a planner bug.
    #[error("internal planner error: {0}")]
    Unresolvable(#[from] DistanceLookupError),
    /// The planner assembled an invalid route. This indicates a planner bug.
    #[error("internal planner error: {0}")]
    InvalidRoute(#[from] RouteError),
}

/// Plan a crawl between two coordinates.
///
/// Implementations should return [`PlanError::InvalidRequest`] for invalid
/// parameters rather than panicking. Planners must be `Send + Sync` so a
/// single session can serve concurrent callers.
pub trait Planner: Send + Sync {
    /// Plan a route for `request`.
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request() -> PlanRequest {
        PlanRequest::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }, 3)
    }

    #[rstest]
    fn default_request_is_valid() {
        assert_eq!(request().validate(), Ok(()));
        assert!((request().uniformity_weight - 0.35).abs() < f64::EPSILON);
    }

    #[rstest]
    fn zero_count_is_rejected() {
        let mut invalid = request();
        invalid.count = 0;
        assert_eq!(
            invalid.validate(),
            Err(PlanRequestValidationError::ZeroCount)
        );
    }

    #[rstest]
    #[case(-0.1)]
    #[case(1.01)]
    #[case(f64::NAN)]
    fn weight_outside_unit_interval_is_rejected(#[case] weight: f64) {
        assert_eq!(
            request().with_uniformity_weight(weight).validate(),
            Err(PlanRequestValidationError::InvalidUniformityWeight)
        );
    }

    #[rstest]
    fn non_finite_end_is_rejected() {
        let mut invalid = request();
        invalid.end = Coord {
            x: f64::INFINITY,
            y: 0.0,
        };
        assert_eq!(
            invalid.validate(),
            Err(PlanRequestValidationError::NonFiniteCoordinate { field: "end" })
        );
    }

    #[rstest]
    #[case(3, Ok(()))]
    #[case(2, Err(PlanRequestValidationError::CountExceedsAvailable { requested: 3, available: 2 }))]
    fn count_is_checked_against_registry(
        #[case] available: usize,
        #[case] expected: Result<(), PlanRequestValidationError>,
    ) {
        assert_eq!(request().validate_for(available), expected);
    }

    #[rstest]
    fn only_complete_status_is_not_degraded() {
        assert!(!PlanStatus::Complete.is_degraded());
        assert!(PlanStatus::NoFeasibleRoute.is_degraded());
        assert!(PlanStatus::ProgressRelaxed.is_degraded());
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn request_json_defaults_weight_and_seed() {
        let parsed: PlanRequest = serde_json::from_str(
            r#"{"start":{"x":0.0,"y":0.0},"end":{"x":1.0,"y":0.0},"count":2}"#,
        )
        .expect("request should parse");
        assert_eq!(parsed.seed, 0);
        assert!((parsed.uniformity_weight - 0.35).abs() < f64::EPSILON);
    }
}

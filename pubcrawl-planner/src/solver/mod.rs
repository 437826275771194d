//! `CrawlPlanner` implementation.

use std::time::Instant;

use log::{debug, warn};
use pubcrawl_core::{
    Diagnostics, DistanceMatrix, DistanceOracle, PlanError, PlanRequest, PlanResponse, PlanStatus,
    Planner, PubRegistry, Route,
};
use thiserror::Error;

use crate::PlannerConfig;
use crate::candidates::select_candidates;
use crate::distance::{DistanceAccessor, EndpointDistances};
use crate::objective::route_distance;
use crate::progress::ProgressTable;
use crate::refine::Refiner;
use crate::strategy::{SearchContext, SearchOutcome};

/// Errors raised while assembling a [`CrawlPlanner`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlannerBuildError {
    /// The distance matrix does not cover the registry.
    #[error("distance matrix has {matrix} rows but the registry holds {registry} pubs")]
    SizeMismatch {
        /// Registry size.
        registry: usize,
        /// Matrix dimension.
        matrix: usize,
    },
    /// A configuration field is out of range.
    #[error("invalid planner configuration: {field} {reason}")]
    InvalidConfig {
        /// Offending field.
        field: &'static str,
        /// What the field must satisfy.
        reason: &'static str,
    },
}

/// Planner that searches a corridor of candidates between start and end.
///
/// A planner owns one session's registry and distance matrix and may serve
/// any number of concurrent [`plan`](Planner::plan) calls; every call keeps
/// its own endpoint cache and random state.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use pubcrawl_core::test_support::{PlanarDistanceOracle, planar_matrix, registry_from_coords};
/// use pubcrawl_core::{PlanRequest, Planner};
/// use pubcrawl_planner::CrawlPlanner;
///
/// let registry = registry_from_coords(&[
///     Coord { x: 0.002, y: 0.0001 },
///     Coord { x: 0.006, y: -0.0001 },
/// ]);
/// let matrix = planar_matrix(&registry);
/// let planner = CrawlPlanner::new(registry, matrix, PlanarDistanceOracle)?;
/// let request = PlanRequest::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 0.01, y: 0.0 }, 2);
/// let response = planner.plan(&request)?;
/// assert_eq!(response.route.pub_count(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct CrawlPlanner<O> {
    registry: PubRegistry,
    matrix: DistanceMatrix,
    oracle: O,
    config: PlannerConfig,
}

impl<O: DistanceOracle> CrawlPlanner<O> {
    /// Construct a planner with the default configuration.
    pub fn new(
        registry: PubRegistry,
        matrix: DistanceMatrix,
        oracle: O,
    ) -> Result<Self, PlannerBuildError> {
        Self::with_config(registry, matrix, oracle, PlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub fn with_config(
        registry: PubRegistry,
        matrix: DistanceMatrix,
        oracle: O,
        config: PlannerConfig,
    ) -> Result<Self, PlannerBuildError> {
        if matrix.size() != registry.len() {
            return Err(PlannerBuildError::SizeMismatch {
                registry: registry.len(),
                matrix: matrix.size(),
            });
        }
        config.validate()?;
        Ok(Self {
            registry,
            matrix,
            oracle,
            config,
        })
    }

    /// The venues this planner chooses from.
    pub const fn registry(&self) -> &PubRegistry {
        &self.registry
    }

    /// The active configuration.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }
}

impl<O> Planner for CrawlPlanner<O>
where
    O: DistanceOracle + Send + Sync,
{
    fn plan(&self, request: &PlanRequest) -> Result<PlanResponse, PlanError> {
        request.validate_for(self.registry.len())?;
        let started_at = Instant::now();

        let progress = ProgressTable::new(&self.registry, request.start, request.end);
        let limit = request
            .count
            .saturating_mul(self.config.candidate_multiplier);
        let candidates =
            select_candidates(&self.registry, &progress, request.start, request.end, limit);
        debug!(
            "planning {} pubs from {} corridor candidates",
            request.count,
            candidates.len()
        );

        let endpoints = EndpointDistances::fetch(
            &self.oracle,
            &self.registry,
            &candidates,
            request.start,
            request.end,
        )
        .map_err(PlanError::Oracle)?;
        let distances = DistanceAccessor::new(&self.matrix, &endpoints);
        let context = SearchContext {
            refiner: Refiner {
                distances,
                progress: &progress,
                uniformity_weight: request.uniformity_weight,
                progress_threshold: self.config.progress_threshold,
            },
            config: &self.config,
            started_at,
        };
        let outcome = context.search(&candidates, request.count, request.seed)?;
        debug!(
            "{:?} search kept {} of {} tours",
            outcome.strategy, outcome.feasible_tours, outcome.tours_evaluated
        );

        self.respond(request, outcome, candidates.len(), &distances, started_at)
    }
}

impl<O> CrawlPlanner<O> {
    #[expect(
        clippy::float_arithmetic,
        reason = "walking time is distance divided by pace"
    )]
    fn respond(
        &self,
        request: &PlanRequest,
        outcome: SearchOutcome,
        candidates_considered: usize,
        distances: &DistanceAccessor<'_>,
        started_at: Instant,
    ) -> Result<PlanResponse, PlanError> {
        let SearchOutcome {
            route,
            strategy,
            tours_evaluated,
            feasible_tours,
        } = outcome;
        let (route, total_distance_meters, status) = match route {
            Some(found) => {
                let total = route_distance(&found, distances)?;
                let status = if feasible_tours == 0 {
                    warn!(
                        "route for {} pubs backtracks beyond the progress tolerance",
                        request.count
                    );
                    PlanStatus::ProgressRelaxed
                } else {
                    PlanStatus::Complete
                };
                (found, total, status)
            }
            None => {
                warn!(
                    "no feasible route among {tours_evaluated} sampled tours for {} pubs",
                    request.count
                );
                (Route::empty(), 0.0, PlanStatus::NoFeasibleRoute)
            }
        };

        Ok(PlanResponse {
            route,
            total_distance_meters,
            estimated_time_minutes: total_distance_meters
                / self.config.walking_speed_meters_per_minute,
            requested_count: request.count,
            status,
            diagnostics: Diagnostics {
                solve_time: started_at.elapsed(),
                candidates_considered,
                strategy,
                tours_evaluated,
                feasible_tours,
            },
        })
    }
}

//! 2-opt local search.

use pubcrawl_core::{PlanError, Route};

use crate::distance::DistanceAccessor;
use crate::objective::refinement_objective;
use crate::progress::ProgressTable;

/// Shared inputs for refining tours within one planning call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Refiner<'a> {
    pub(crate) distances: DistanceAccessor<'a>,
    pub(crate) progress: &'a ProgressTable,
    pub(crate) uniformity_weight: f64,
    pub(crate) progress_threshold: f64,
}

impl Refiner<'_> {
    /// Apply first-improvement 2-opt until no segment reversal helps.
    ///
    /// Reversals that break the forward-progress constraint are skipped, and
    /// only strict improvements are accepted, so the result never scores worse
    /// than `route`. Tours with fewer than two venues have no segment to
    /// reverse and are returned as they are.
    pub(crate) fn two_opt(&self, route: Route) -> Result<Route, PlanError> {
        if route.pub_count() < 2 {
            return Ok(route);
        }
        let mut best = route;
        let mut best_score = self.score(&best)?;

        'scan: loop {
            let last_interior = best.len().saturating_sub(2);
            for i in 1..last_interior {
                for j in (i + 1)..=last_interior {
                    let Some(candidate) = best.with_reversed_segment(i, j) else {
                        continue;
                    };
                    if self
                        .progress
                        .violates(&candidate, self.progress_threshold)?
                    {
                        continue;
                    }
                    let score = self.score(&candidate)?;
                    if score < best_score {
                        best = candidate;
                        best_score = score;
                        continue 'scan;
                    }
                }
            }
            break;
        }

        Ok(best)
    }

    fn score(&self, route: &Route) -> Result<f64, PlanError> {
        Ok(refinement_objective(
            route,
            self.uniformity_weight,
            &self.distances,
        )?)
    }
}

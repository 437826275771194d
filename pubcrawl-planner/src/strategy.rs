//! Subset search: random sampling for short crawls, greedy growth for long
//! ones.

use std::time::Instant;

use log::{debug, trace};
use pubcrawl_core::{PlanError, PubIndex, Route, RouteElement, SearchStrategy};
use rand::SeedableRng;
use rand::seq::index;
use rand_chacha::ChaCha8Rng;

use crate::PlannerConfig;
use crate::construct::nearest_neighbour;
use crate::objective::evaluate_route;
use crate::refine::Refiner;

/// Result of one subset search.
#[derive(Debug, Clone)]
pub(crate) struct SearchOutcome {
    /// Best route found, or `None` when no tour was feasible.
    pub(crate) route: Option<Route>,
    pub(crate) strategy: SearchStrategy,
    pub(crate) tours_evaluated: usize,
    pub(crate) feasible_tours: usize,
}

/// Inputs shared by both strategies.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SearchContext<'a> {
    pub(crate) refiner: Refiner<'a>,
    pub(crate) config: &'a PlannerConfig,
    pub(crate) started_at: Instant,
}

impl SearchContext<'_> {
    /// Dispatch on `count` against the sampling threshold.
    pub(crate) fn search(
        &self,
        candidates: &[PubIndex],
        count: usize,
        seed: u64,
    ) -> Result<SearchOutcome, PlanError> {
        if count <= self.config.sampling_threshold {
            self.sample(candidates, count, seed)
        } else {
            self.greedy(candidates, count)
        }
    }

    /// Draw random `count`-subsets, build and refine a tour for each, and keep
    /// the best feasible one. The earliest sample wins ties.
    pub(crate) fn sample(
        &self,
        candidates: &[PubIndex],
        count: usize,
        seed: u64,
    ) -> Result<SearchOutcome, PlanError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let amount = count.min(candidates.len());
        let mut best: Option<Route> = None;
        let mut best_score = f64::INFINITY;
        let mut tours_evaluated = 0;
        let mut feasible_tours = 0;

        for _ in 0..self.config.sample_count {
            if tours_evaluated > 0 && self.budget_exhausted() {
                debug!("solve budget exhausted after {tours_evaluated} samples");
                break;
            }
            let subset: Vec<PubIndex> = index::sample(&mut rng, candidates.len(), amount)
                .into_iter()
                .filter_map(|position| candidates.get(position).copied())
                .collect();
            tours_evaluated += 1;

            let tour = nearest_neighbour(
                &subset,
                &self.refiner.distances,
                self.refiner.progress,
                self.config.backtrack_penalty,
            )?;
            let refined = self.refiner.two_opt(tour)?;
            if self
                .refiner
                .progress
                .violates(&refined, self.config.progress_threshold)?
            {
                continue;
            }
            let score = evaluate_route(
                &refined,
                self.refiner.uniformity_weight,
                &self.refiner.distances,
            )?;
            if !score.is_finite() {
                trace!("sample {tours_evaluated} walks an unreachable leg");
                continue;
            }
            feasible_tours += 1;
            if score < best_score {
                trace!("sample {tours_evaluated} improved the score to {score:.1}");
                best_score = score;
                best = Some(refined);
            }
        }

        Ok(SearchOutcome {
            route: best,
            strategy: SearchStrategy::Sampling,
            tours_evaluated,
            feasible_tours,
        })
    }

    /// Pick venues by growing one route from the start, each time taking the
    /// venue cheapest to visit on the way to the end. The picked venues are
    /// then toured like a sample: nearest neighbour, then 2-opt.
    ///
    /// Venues that would lose more progress than the tolerance are skipped
    /// while any alternative remains; once none does, the cheapest venue is
    /// taken regardless of progress.
    #[expect(
        clippy::float_arithmetic,
        reason = "greedy growth compares floating-point distances"
    )]
    pub(crate) fn greedy(
        &self,
        candidates: &[PubIndex],
        count: usize,
    ) -> Result<SearchOutcome, PlanError> {
        let distances = &self.refiner.distances;
        let progress = self.refiner.progress;
        let mut remaining = candidates.to_vec();
        let mut order = Vec::with_capacity(count);
        let mut current = RouteElement::Start;

        while order.len() < count {
            let current_progress = progress.of_element(current)?;
            let mut forward: Option<(usize, f64)> = None;
            let mut fallback: Option<(usize, f64)> = None;
            for (position, &candidate) in remaining.iter().enumerate() {
                let venue = RouteElement::Pub(candidate);
                let detour = distances.distance(current, venue)?
                    + distances.distance(venue, RouteElement::End)?;
                if fallback.is_none_or(|(_, cost)| detour < cost) {
                    fallback = Some((position, detour));
                }
                let regression = current_progress - progress.of(candidate)?;
                if regression > self.config.progress_threshold {
                    continue;
                }
                let cost = detour + regression.max(0.0) * self.config.greedy_backtrack_penalty;
                if forward.is_none_or(|(_, best_cost)| cost < best_cost) {
                    forward = Some((position, cost));
                }
            }
            let Some((position, _)) = forward.or(fallback) else {
                break;
            };
            if forward.is_none() {
                debug!(
                    "no forward candidate after {} venues; relaxing progress",
                    order.len()
                );
            }
            let chosen = remaining.remove(position);
            current = RouteElement::Pub(chosen);
            order.push(chosen);
        }

        let tour = nearest_neighbour(
            &order,
            distances,
            progress,
            self.config.backtrack_penalty,
        )?;
        let refined = self.refiner.two_opt(tour)?;
        let feasible = !progress.violates(&refined, self.config.progress_threshold)?;
        Ok(SearchOutcome {
            route: Some(refined),
            strategy: SearchStrategy::Greedy,
            tours_evaluated: 1,
            feasible_tours: usize::from(feasible),
        })
    }

    fn budget_exhausted(&self) -> bool {
        self.config
            .max_solve_time
            .is_some_and(|budget| self.started_at.elapsed() >= budget)
    }
}

//! Tour construction.

use pubcrawl_core::{PlanError, PubIndex, Route, RouteElement};

use crate::distance::DistanceAccessor;
use crate::progress::ProgressTable;

/// Build a tour through every venue in `subset` by nearest neighbour, charging
/// `backtrack_penalty` meters per unit of lost progress.
///
/// Ties go to the venue listed first in `subset`.
#[expect(
    clippy::float_arithmetic,
    reason = "tour construction compares floating-point distances"
)]
pub(crate) fn nearest_neighbour(
    subset: &[PubIndex],
    distances: &DistanceAccessor<'_>,
    progress: &ProgressTable,
    backtrack_penalty: f64,
) -> Result<Route, PlanError> {
    let mut remaining = subset.to_vec();
    let mut order = Vec::with_capacity(subset.len());
    let mut current = RouteElement::Start;

    while !remaining.is_empty() {
        let current_progress = progress.of_element(current)?;
        let mut best: Option<(usize, f64)> = None;
        for (position, &candidate) in remaining.iter().enumerate() {
            let leg = distances.distance(current, RouteElement::Pub(candidate))?;
            let lost = (current_progress - progress.of(candidate)?).max(0.0);
            let cost = leg + lost * backtrack_penalty;
            if best.is_none_or(|(_, best_cost)| cost < best_cost) {
                best = Some((position, cost));
            }
        }
        let Some((position, _)) = best else { break };
        let chosen = remaining.remove(position);
        current = RouteElement::Pub(chosen);
        order.push(chosen);
    }

    Ok(Route::new(order)?)
}

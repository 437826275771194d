//! Route scoring. Lower scores are better.

use pubcrawl_core::{DistanceLookupError, Route};

use crate::distance::DistanceAccessor;

/// Scale applied to the spacing deviation before it is added to the distance.
const UNIFORMITY_SCALE: f64 = 100.0;

/// Length of every leg of `route`, including the legs from the start and to
/// the end.
pub(crate) fn segment_lengths(
    route: &Route,
    distances: &DistanceAccessor<'_>,
) -> Result<Vec<f64>, DistanceLookupError> {
    route
        .legs()
        .map(|(from, to)| distances.distance(from, to))
        .collect()
}

/// Total walking distance of `route`.
pub(crate) fn route_distance(
    route: &Route,
    distances: &DistanceAccessor<'_>,
) -> Result<f64, DistanceLookupError> {
    Ok(segment_lengths(route, distances)?.into_iter().sum())
}

/// Population standard deviation of `values`; zero for fewer than two values.
///
/// # Examples
/// ```rust
/// use pubcrawl_planner::population_std_dev;
///
/// assert_eq!(population_std_dev(&[250.0]), 0.0);
/// assert_eq!(population_std_dev(&[100.0, 300.0]), 100.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "standard deviation is computed in floating point over small slices"
)]
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values
        .iter()
        .map(|value| (value - mean) * (value - mean))
        .sum::<f64>()
        / count;
    variance.sqrt()
}

/// Total distance plus a penalty for uneven leg lengths, weighted by
/// `uniformity_weight`.
#[expect(
    clippy::float_arithmetic,
    reason = "the objective blends distance and spacing in floating point"
)]
pub(crate) fn evaluate_route(
    route: &Route,
    uniformity_weight: f64,
    distances: &DistanceAccessor<'_>,
) -> Result<f64, DistanceLookupError> {
    let segments = segment_lengths(route, distances)?;
    let total: f64 = segments.iter().sum();
    Ok(total + uniformity_weight * population_std_dev(&segments) * UNIFORMITY_SCALE)
}

/// Objective used while refining: the weighted score when spacing matters,
/// plain distance otherwise.
pub(crate) fn refinement_objective(
    route: &Route,
    uniformity_weight: f64,
    distances: &DistanceAccessor<'_>,
) -> Result<f64, DistanceLookupError> {
    if uniformity_weight > 0.0 {
        evaluate_route(route, uniformity_weight, distances)
    } else {
        route_distance(route, distances)
    }
}

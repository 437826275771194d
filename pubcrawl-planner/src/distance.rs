//! Distance lookups between route elements.
//!
//! Pub-to-pub legs come from the precomputed [`DistanceMatrix`]. Legs that
//! touch the caller's start or end depend on the request, so they are fetched
//! from the [`DistanceOracle`] for the whole candidate set up front and cached
//! for the rest of the call.

use std::collections::HashMap;

use geo::Coord;
use log::debug;
use pubcrawl_core::{
    DistanceError, DistanceLookupError, DistanceMatrix, DistanceOracle, PubIndex, PubRegistry,
    RouteElement,
};

/// Start and end legs for one planning call's candidates.
#[derive(Debug, Clone, Default)]
pub(crate) struct EndpointDistances {
    from_start: HashMap<PubIndex, f64>,
    to_end: HashMap<PubIndex, f64>,
}

impl EndpointDistances {
    /// Fetch both endpoint legs with one batched oracle call each.
    pub(crate) fn fetch<O: DistanceOracle>(
        oracle: &O,
        registry: &PubRegistry,
        candidates: &[PubIndex],
        start: Coord<f64>,
        end: Coord<f64>,
    ) -> Result<Self, DistanceError> {
        let (indices, coords): (Vec<PubIndex>, Vec<Coord<f64>>) = candidates
            .iter()
            .filter_map(|&index| registry.location(index).map(|coord| (index, coord)))
            .unzip();
        let from_start = oracle.distances_from(start, &coords)?;
        let to_end = oracle.distances_to(&coords, end)?;
        debug!(
            "fetched endpoint distances for {} candidates",
            indices.len()
        );
        Ok(Self {
            from_start: indices.iter().copied().zip(from_start).collect(),
            to_end: indices.into_iter().zip(to_end).collect(),
        })
    }

    #[cfg(test)]
    pub(crate) fn from_pairs(
        from_start: impl IntoIterator<Item = (PubIndex, f64)>,
        to_end: impl IntoIterator<Item = (PubIndex, f64)>,
    ) -> Self {
        Self {
            from_start: from_start.into_iter().collect(),
            to_end: to_end.into_iter().collect(),
        }
    }
}

/// Resolves the distance of any valid leg between route elements.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DistanceAccessor<'a> {
    matrix: &'a DistanceMatrix,
    endpoints: &'a EndpointDistances,
}

impl<'a> DistanceAccessor<'a> {
    pub(crate) const fn new(matrix: &'a DistanceMatrix, endpoints: &'a EndpointDistances) -> Self {
        Self { matrix, endpoints }
    }

    /// Distance in meters from `from` to `to`.
    ///
    /// Only forward legs are valid: the start may lead to a venue, a venue to
    /// another venue or the end.
    pub(crate) fn distance(
        &self,
        from: RouteElement,
        to: RouteElement,
    ) -> Result<f64, DistanceLookupError> {
        match (from, to) {
            (RouteElement::Pub(a), RouteElement::Pub(b)) => {
                self.matrix.get(a, b).ok_or_else(|| {
                    let index = if a.get() >= self.matrix.size() { a } else { b };
                    DistanceLookupError::OutOfRange { index }
                })
            }
            (RouteElement::Start, RouteElement::Pub(index)) => self
                .endpoints
                .from_start
                .get(&index)
                .copied()
                .ok_or(DistanceLookupError::Unavailable { from, to }),
            (RouteElement::Pub(index), RouteElement::End) => self
                .endpoints
                .to_end
                .get(&index)
                .copied()
                .ok_or(DistanceLookupError::Unavailable { from, to }),
            _ => Err(DistanceLookupError::InvalidPair { from, to }),
        }
    }
}

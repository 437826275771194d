//! Turn-by-turn legs for a planned route.

use geo::Coord;
use log::debug;
use pubcrawl_core::{
    DirectionsProvider, DistanceError, PubIndex, PubRegistry, Route, RouteElement, RouteLeg,
};
use thiserror::Error;

/// Errors returned by [`navigation_legs`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    /// The route names a venue missing from the registry.
    #[error("pub {index} is not in the registry")]
    UnknownPub {
        /// The missing index.
        index: PubIndex,
    },
    /// The directions provider failed for one leg.
    #[error("directions for leg {leg} failed: {source}")]
    Directions {
        /// Zero-based leg position.
        leg: usize,
        /// Underlying failure.
        #[source]
        source: DistanceError,
    },
}

/// Fetch walking directions for every leg of `route`, in order.
///
/// Legs are requested one at a time; the first failure aborts the walk.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use pubcrawl_core::test_support::{StraightLineDirections, registry_from_coords};
/// use pubcrawl_core::{PubIndex, Route};
/// use pubcrawl_planner::navigation_legs;
///
/// let registry = registry_from_coords(&[Coord { x: 0.001, y: 0.0 }]);
/// let route = Route::new(vec![PubIndex::new(0)])?;
/// let legs = navigation_legs(
///     &route,
///     &registry,
///     Coord { x: 0.0, y: 0.0 },
///     Coord { x: 0.002, y: 0.0 },
///     &StraightLineDirections,
/// )?;
/// assert_eq!(legs.len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn navigation_legs<D: DirectionsProvider + ?Sized>(
    route: &Route,
    registry: &PubRegistry,
    start: Coord<f64>,
    end: Coord<f64>,
    provider: &D,
) -> Result<Vec<RouteLeg>, NavigationError> {
    let locate = |element: RouteElement| match element {
        RouteElement::Start => Ok(start),
        RouteElement::End => Ok(end),
        RouteElement::Pub(index) => registry
            .location(index)
            .ok_or(NavigationError::UnknownPub { index }),
    };

    route
        .legs()
        .enumerate()
        .map(|(leg, (from, to))| {
            let origin = locate(from)?;
            let destination = locate(to)?;
            debug!("requesting directions for leg {leg}: {from} -> {to}");
            provider
                .directions(origin, destination)
                .map_err(|source| NavigationError::Directions { leg, source })
        })
        .collect()
}

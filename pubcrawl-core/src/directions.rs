//! Turn-by-turn directions for the legs of a finished route.
//!
//! Directions only annotate a route that has already been decided; they never
//! feed back into planning.

use geo::{Coord, LineString};

use crate::DistanceError;

/// A single manoeuvre within a [`RouteLeg`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegStep {
    /// Name of the way being followed; empty when unnamed.
    pub name: String,
    /// Manoeuvre type, e.g. `"turn"` or `"arrive"`.
    pub maneuver: String,
    /// Optional manoeuvre modifier, e.g. `"left"`.
    pub modifier: Option<String>,
    /// Step length in meters.
    pub distance_meters: f64,
    /// Step duration in seconds.
    pub duration_seconds: f64,
}

/// Walking directions between two consecutive route elements.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteLeg {
    /// Leg length in meters.
    pub distance_meters: f64,
    /// Leg duration in seconds.
    pub duration_seconds: f64,
    /// Manoeuvres in order.
    pub steps: Vec<LegStep>,
    /// Path geometry, `x = longitude`, `y = latitude`.
    pub geometry: LineString<f64>,
}

/// Fetch walking directions between two coordinates.
///
/// # Examples
///
/// ```rust
/// use geo::{Coord, LineString};
/// use pubcrawl_core::{DirectionsProvider, DistanceError, RouteLeg};
///
/// struct StraightLine;
///
/// impl DirectionsProvider for StraightLine {
///     fn directions(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, DistanceError> {
///         Ok(RouteLeg {
///             distance_meters: 0.0,
///             duration_seconds: 0.0,
///             steps: Vec::new(),
///             geometry: LineString::from(vec![from, to]),
///         })
///     }
/// }
///
/// let leg = StraightLine.directions(Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 })?;
/// assert_eq!(leg.geometry.0.len(), 2);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait DirectionsProvider {
    /// Return directions from `from` to `to`.
    fn directions(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, DistanceError>;
}

impl<T: DirectionsProvider + ?Sized> DirectionsProvider for &T {
    fn directions(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, DistanceError> {
        (**self).directions(from, to)
    }
}

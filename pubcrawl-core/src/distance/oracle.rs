//! Batched distance queries against arbitrary coordinates.

use geo::Coord;

use super::error::DistanceError;

/// Source of walking distances between arbitrary coordinates.
///
/// Implementations return a full `n x n` table for `coords`, where
/// `table[i][j]` is the distance in meters from `coords[i]` to `coords[j]`
/// and unreachable pairs are [`f64::INFINITY`]. The one-to-many and
/// many-to-one helpers are derived from that table; implementations backed by
/// a service with cheaper one-to-many queries may override them.
///
/// Remote oracles are expensive per call, so planners call
/// [`distances_from`](Self::distances_from) and
/// [`distances_to`](Self::distances_to) once each per planning request.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use pubcrawl_core::{DistanceError, DistanceOracle};
///
/// struct Manhattan;
///
/// impl DistanceOracle for Manhattan {
///     fn distance_table(&self, coords: &[Coord<f64>]) -> Result<Vec<Vec<f64>>, DistanceError> {
///         if coords.is_empty() {
///             return Err(DistanceError::EmptyInput);
///         }
///         Ok(coords
///             .iter()
///             .map(|a| coords.iter().map(|b| (a.x - b.x).abs() + (a.y - b.y).abs()).collect())
///             .collect())
///     }
/// }
///
/// let origin = Coord { x: 0.0, y: 0.0 };
/// let targets = [Coord { x: 1.0, y: 1.0 }, Coord { x: 3.0, y: 0.0 }];
/// assert_eq!(Manhattan.distances_from(origin, &targets)?, vec![2.0, 3.0]);
/// assert_eq!(Manhattan.distances_to(&targets, origin)?, vec![2.0, 3.0]);
/// # Ok::<(), DistanceError>(())
/// ```
pub trait DistanceOracle {
    /// Return the pairwise distance table for `coords`.
    ///
    /// Implementations must return `Err(DistanceError::EmptyInput)` when
    /// `coords` is empty.
    fn distance_table(&self, coords: &[Coord<f64>]) -> Result<Vec<Vec<f64>>, DistanceError>;

    /// Distances from `origin` to each of `destinations`, in order.
    fn distances_from(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
    ) -> Result<Vec<f64>, DistanceError> {
        if destinations.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        let mut coords = Vec::with_capacity(destinations.len() + 1);
        coords.push(origin);
        coords.extend_from_slice(destinations);
        let table = self.distance_table(&coords)?;
        let row = table.first().ok_or(DistanceError::LengthMismatch {
            expected: coords.len(),
            actual: 0,
        })?;
        let distances: Vec<f64> = row.iter().skip(1).copied().collect();
        ensure_len(destinations.len(), distances)
    }

    /// Distances from each of `origins` to `destination`, in order.
    fn distances_to(
        &self,
        origins: &[Coord<f64>],
        destination: Coord<f64>,
    ) -> Result<Vec<f64>, DistanceError> {
        if origins.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        let mut coords = Vec::with_capacity(origins.len() + 1);
        coords.extend_from_slice(origins);
        coords.push(destination);
        let table = self.distance_table(&coords)?;
        let last = origins.len();
        let distances: Vec<f64> = table
            .iter()
            .take(origins.len())
            .filter_map(|row| row.get(last).copied())
            .collect();
        ensure_len(origins.len(), distances)
    }
}

fn ensure_len(expected: usize, distances: Vec<f64>) -> Result<Vec<f64>, DistanceError> {
    if distances.len() == expected {
        Ok(distances)
    } else {
        Err(DistanceError::LengthMismatch {
            expected,
            actual: distances.len(),
        })
    }
}

impl<T: DistanceOracle + ?Sized> DistanceOracle for &T {
    fn distance_table(&self, coords: &[Coord<f64>]) -> Result<Vec<Vec<f64>>, DistanceError> {
        (**self).distance_table(coords)
    }

    fn distances_from(
        &self,
        origin: Coord<f64>,
        destinations: &[Coord<f64>],
    ) -> Result<Vec<f64>, DistanceError> {
        (**self).distances_from(origin, destinations)
    }

    fn distances_to(
        &self,
        origins: &[Coord<f64>],
        destination: Coord<f64>,
    ) -> Result<Vec<f64>, DistanceError> {
        (**self).distances_to(origins, destination)
    }
}

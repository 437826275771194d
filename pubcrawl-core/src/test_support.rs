//! Deterministic collaborators and fixtures used by unit and behaviour tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use geo::{Coord, LineString};

use crate::geometry::METERS_PER_DEGREE;
use crate::{
    DirectionsProvider, DistanceError, DistanceMatrix, DistanceOracle, LegStep, Pub, PubRegistry,
    RouteLeg,
};

fn planar(a: Coord<f64>, b: Coord<f64>) -> f64 {
    (a.x - b.x).hypot(a.y - b.y) * METERS_PER_DEGREE
}

/// `DistanceOracle` measuring straight lines on the degree plane.
///
/// One degree maps to [`METERS_PER_DEGREE`], so `0.001` degrees is 111 m.
#[derive(Default, Debug, Copy, Clone)]
pub struct PlanarDistanceOracle;

impl DistanceOracle for PlanarDistanceOracle {
    fn distance_table(&self, coords: &[Coord<f64>]) -> Result<Vec<Vec<f64>>, DistanceError> {
        if coords.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        Ok(coords
            .iter()
            .map(|&a| coords.iter().map(|&b| planar(a, b)).collect())
            .collect())
    }
}

/// Wraps another oracle and counts how many tables it served.
#[derive(Debug, Default)]
pub struct CountingOracle<O> {
    inner: O,
    calls: AtomicUsize,
}

impl<O> CountingOracle<O> {
    /// Wrap `inner`.
    pub const fn new(inner: O) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `distance_table` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<O: DistanceOracle> DistanceOracle for CountingOracle<O> {
    fn distance_table(&self, coords: &[Coord<f64>]) -> Result<Vec<Vec<f64>>, DistanceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.distance_table(coords)
    }
}

/// Oracle that always fails with the configured error.
#[derive(Debug, Clone)]
pub struct FailingOracle(pub DistanceError);

impl DistanceOracle for FailingOracle {
    fn distance_table(&self, _coords: &[Coord<f64>]) -> Result<Vec<Vec<f64>>, DistanceError> {
        Err(self.0.clone())
    }
}

/// `DirectionsProvider` returning a single straight step per leg.
#[derive(Default, Debug, Copy, Clone)]
pub struct StraightLineDirections;

impl DirectionsProvider for StraightLineDirections {
    fn directions(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, DistanceError> {
        let distance_meters = planar(from, to);
        let duration_seconds = distance_meters / crate::WALKING_SPEED_METERS_PER_MINUTE * 60.0;
        Ok(RouteLeg {
            distance_meters,
            duration_seconds,
            steps: vec![LegStep {
                name: String::new(),
                maneuver: "depart".into(),
                modifier: None,
                distance_meters,
                duration_seconds,
            }],
            geometry: LineString::from(vec![from, to]),
        })
    }
}

/// Registry with one venue per coordinate, identified as `pub-0`, `pub-1`, ...
#[must_use]
pub fn registry_from_coords(coords: &[Coord<f64>]) -> PubRegistry {
    let pubs = coords
        .iter()
        .enumerate()
        .map(|(idx, &location)| Pub::new(format!("pub-{idx}"), format!("Pub {idx}"), location))
        .collect();
    PubRegistry::new(pubs).expect("generated ids are unique")
}

/// Planar pub-to-pub matrix for `registry`.
///
/// # Panics
/// Panics if a venue location is NaN.
#[must_use]
pub fn planar_matrix(registry: &PubRegistry) -> DistanceMatrix {
    let rows = registry
        .iter()
        .map(|(_, a)| {
            registry
                .iter()
                .map(|(_, b)| planar(a.location, b.location))
                .collect()
        })
        .collect();
    DistanceMatrix::from_rows(rows).expect("planar distances are finite")
}

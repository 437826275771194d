//! Test utilities for routing services.
//!
//! [`StubRoutingService`] returns pre-configured responses without making
//! HTTP requests, and [`RecordingOracle`] records the size of every table a
//! wrapped oracle serves.

use std::sync::Mutex;

use geo::{Coord, LineString};
use pubcrawl_core::{DirectionsProvider, DistanceError, DistanceOracle, RouteLeg};

/// Stub routing service implementing both routing traits.
///
/// # Example
///
/// ```
/// use geo::Coord;
/// use pubcrawl_core::DistanceOracle;
/// use pubcrawl_data::routing::test_support::StubRoutingService;
///
/// let service = StubRoutingService::with_table(vec![vec![0.0, 60.0], vec![60.0, 0.0]]);
/// let coords = [Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }];
///
/// assert!(service.distance_table(&coords).is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct StubRoutingService {
    response: StubResponse,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Table(Vec<Vec<f64>>),
    Leg(RouteLeg),
    Error(DistanceError),
}

impl StubRoutingService {
    /// Create a service whose distance tables are always `table`.
    ///
    /// Directions requests receive a straight two-point leg of the same
    /// length as the `(0, 1)` entry.
    #[must_use]
    pub const fn with_table(table: Vec<Vec<f64>>) -> Self {
        Self {
            response: StubResponse::Table(table),
        }
    }

    /// Create a service whose directions are always `leg`.
    ///
    /// Distance tables are zero-filled to the requested size.
    #[must_use]
    pub const fn with_leg(leg: RouteLeg) -> Self {
        Self {
            response: StubResponse::Leg(leg),
        }
    }

    /// Create a service that fails every non-empty request with `error`.
    #[must_use]
    pub const fn with_error(error: DistanceError) -> Self {
        Self {
            response: StubResponse::Error(error),
        }
    }
}

impl DistanceOracle for StubRoutingService {
    fn distance_table(&self, coords: &[Coord<f64>]) -> Result<Vec<Vec<f64>>, DistanceError> {
        if coords.is_empty() {
            return Err(DistanceError::EmptyInput);
        }
        match &self.response {
            StubResponse::Table(table) => Ok(table.clone()),
            StubResponse::Leg(_) => Ok(vec![vec![0.0; coords.len()]; coords.len()]),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

impl DirectionsProvider for StubRoutingService {
    fn directions(&self, from: Coord<f64>, to: Coord<f64>) -> Result<RouteLeg, DistanceError> {
        match &self.response {
            StubResponse::Table(table) => {
                let distance_meters = table
                    .first()
                    .and_then(|row| row.get(1))
                    .copied()
                    .unwrap_or_default();
                Ok(RouteLeg {
                    distance_meters,
                    duration_seconds: 0.0,
                    steps: Vec::new(),
                    geometry: LineString::from(vec![from, to]),
                })
            }
            StubResponse::Leg(leg) => Ok(leg.clone()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

/// Wraps an oracle and records how many coordinates each table request
/// carried.
#[derive(Debug, Default)]
pub struct RecordingOracle<O> {
    inner: O,
    requests: Mutex<Vec<usize>>,
}

impl<O> RecordingOracle<O> {
    /// Wrap `inner`.
    #[must_use]
    pub const fn new(inner: O) -> Self {
        Self {
            inner,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Coordinate counts of the requests served so far, in order.
    #[must_use]
    pub fn request_sizes(&self) -> Vec<usize> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl<O: DistanceOracle> DistanceOracle for RecordingOracle<O> {
    fn distance_table(&self, coords: &[Coord<f64>]) -> Result<Vec<Vec<f64>>, DistanceError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(coords.len());
        }
        self.inner.distance_table(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubcrawl_core::test_support::PlanarDistanceOracle;
    use rstest::rstest;

    fn coords(count: usize) -> Vec<Coord<f64>> {
        (0..count)
            .map(|i| Coord {
                x: f64::from(u32::try_from(i).expect("small count")) * 0.001,
                y: 0.0,
            })
            .collect()
    }

    #[rstest]
    fn stub_returns_configured_table() {
        let table = vec![vec![0.0, 60.0], vec![60.0, 0.0]];
        let service = StubRoutingService::with_table(table.clone());

        assert_eq!(service.distance_table(&coords(2)), Ok(table));
    }

    #[rstest]
    fn stub_rejects_empty_input() {
        let service = StubRoutingService::with_table(Vec::new());

        assert_eq!(service.distance_table(&[]), Err(DistanceError::EmptyInput));
    }

    #[rstest]
    fn stub_returns_configured_error_for_both_services() {
        let error = DistanceError::Timeout {
            url: "http://example.com/route/v1/foot".to_owned(),
            timeout_secs: 30,
        };
        let service = StubRoutingService::with_error(error.clone());
        let points = coords(2);

        assert_eq!(service.distance_table(&points), Err(error.clone()));
        assert_eq!(service.directions(points[0], points[1]), Err(error));
    }

    #[rstest]
    fn table_stub_draws_straight_legs() {
        let service = StubRoutingService::with_table(vec![vec![0.0, 42.0], vec![42.0, 0.0]]);
        let points = coords(2);

        let leg = service
            .directions(points[0], points[1])
            .expect("stub directions succeed");

        assert_eq!(leg.distance_meters, 42.0);
        assert_eq!(leg.geometry.0, points);
    }

    #[rstest]
    fn recording_oracle_tracks_request_sizes() {
        let oracle = RecordingOracle::new(PlanarDistanceOracle);

        oracle.distance_table(&coords(3)).expect("planar succeeds");
        oracle.distance_table(&coords(5)).expect("planar succeeds");

        assert_eq!(oracle.request_sizes(), vec![3, 5]);
    }
}

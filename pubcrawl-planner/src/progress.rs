//! Forward-progress bookkeeping.

use geo::Coord;
use pubcrawl_core::geometry::progress;
use pubcrawl_core::{DistanceLookupError, PubIndex, PubRegistry, Route, RouteElement};

/// Progress of every registry venue along the current start/end axis.
///
/// Computed once per planning call.
#[derive(Debug, Clone)]
pub(crate) struct ProgressTable {
    values: Vec<f64>,
}

impl ProgressTable {
    pub(crate) fn new(registry: &PubRegistry, start: Coord<f64>, end: Coord<f64>) -> Self {
        let values = registry
            .iter()
            .map(|(_, venue)| progress(start, end, venue.location))
            .collect();
        Self { values }
    }

    #[cfg(test)]
    pub(crate) const fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub(crate) fn of(&self, index: PubIndex) -> Result<f64, DistanceLookupError> {
        self.values
            .get(index.get())
            .copied()
            .ok_or(DistanceLookupError::OutOfRange { index })
    }

    /// `Start` sits at zero and `End` at one.
    pub(crate) fn of_element(&self, element: RouteElement) -> Result<f64, DistanceLookupError> {
        match element {
            RouteElement::Start => Ok(0.0),
            RouteElement::End => Ok(1.0),
            RouteElement::Pub(index) => self.of(index),
        }
    }

    /// Whether `route` drops by more than `threshold` between two consecutive
    /// venues.
    pub(crate) fn violates(
        &self,
        route: &Route,
        threshold: f64,
    ) -> Result<bool, DistanceLookupError> {
        let values = route
            .pubs()
            .map(|index| self.of(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(progress_regresses(&values, threshold))
    }
}

/// Whether any value in `sequence` is more than `threshold` below its
/// predecessor.
///
/// Sequences shorter than two never regress.
///
/// # Examples
/// ```rust
/// use pubcrawl_planner::progress_regresses;
///
/// assert!(progress_regresses(&[0.1, 0.4, 0.2], 0.05));
/// assert!(!progress_regresses(&[0.1, 0.4, 0.38], 0.05));
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "progress tolerance is a floating-point comparison"
)]
pub fn progress_regresses(sequence: &[f64], threshold: f64) -> bool {
    sequence
        .windows(2)
        .any(|pair| matches!(pair, [previous, next] if *next < *previous - threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubcrawl_core::test_support::registry_from_coords;
    use rstest::rstest;

    #[rstest]
    #[case(&[], false)]
    #[case(&[0.9], false)]
    #[case(&[0.1, 0.4, 0.2], true)]
    #[case(&[0.1, 0.4, 0.38], false)]
    #[case(&[0.5, 0.45], false)]
    #[case(&[0.5, 0.44], true)]
    fn regression_uses_strict_tolerance(#[case] sequence: &[f64], #[case] expected: bool) {
        assert_eq!(progress_regresses(sequence, 0.05), expected);
    }

    #[rstest]
    fn table_projects_registry_onto_axis() {
        let registry = registry_from_coords(&[Coord { x: 0.25, y: 1.0 }, Coord { x: 0.75, y: -1.0 }]);
        let table = ProgressTable::new(&registry, Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 });
        assert_eq!(table.of(PubIndex::new(0)), Ok(0.25));
        assert_eq!(table.of(PubIndex::new(1)), Ok(0.75));
        assert_eq!(table.of_element(RouteElement::Start), Ok(0.0));
        assert_eq!(
            table.of(PubIndex::new(2)),
            Err(DistanceLookupError::OutOfRange {
                index: PubIndex::new(2)
            })
        );
    }

    #[rstest]
    fn route_violation_reads_pub_order() {
        let table = ProgressTable::from_values(vec![0.1, 0.4, 0.2]);
        let forward = Route::new(vec![PubIndex::new(0), PubIndex::new(2), PubIndex::new(1)])
            .expect("valid route");
        let backward = Route::new(vec![PubIndex::new(0), PubIndex::new(1), PubIndex::new(2)])
            .expect("valid route");
        assert_eq!(table.violates(&forward, 0.05), Ok(false));
        assert_eq!(table.violates(&backward, 0.05), Ok(true));
    }
}

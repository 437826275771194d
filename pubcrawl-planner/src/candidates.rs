//! Corridor candidate selection.

use geo::Coord;
use pubcrawl_core::geometry::corridor_distance;
use pubcrawl_core::{PubIndex, PubRegistry};

use crate::progress::ProgressTable;

/// Keep the `limit` venues closest to the start/end axis, ordered by progress.
///
/// Both sorts are stable, so ties keep registry order.
pub(crate) fn select_candidates(
    registry: &PubRegistry,
    progress: &ProgressTable,
    start: Coord<f64>,
    end: Coord<f64>,
    limit: usize,
) -> Vec<PubIndex> {
    let mut scored: Vec<(PubIndex, f64)> = registry
        .iter()
        .map(|(index, venue)| (index, corridor_distance(start, end, venue.location)))
        .collect();
    scored.sort_by(|(_, lhs), (_, rhs)| lhs.total_cmp(rhs));
    scored.truncate(limit);

    let mut selected: Vec<(PubIndex, f64)> = scored
        .into_iter()
        .map(|(index, _)| (index, progress.of(index).unwrap_or(0.0)))
        .collect();
    selected.sort_by(|(_, lhs), (_, rhs)| lhs.total_cmp(rhs));
    selected.into_iter().map(|(index, _)| index).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pubcrawl_core::test_support::registry_from_coords;
    use rstest::rstest;

    const START: Coord<f64> = Coord { x: 0.0, y: 0.0 };
    const END: Coord<f64> = Coord { x: 1.0, y: 0.0 };

    fn select(coords: &[Coord<f64>], limit: usize) -> Vec<usize> {
        let registry = registry_from_coords(coords);
        let progress = ProgressTable::new(&registry, START, END);
        select_candidates(&registry, &progress, START, END, limit)
            .into_iter()
            .map(PubIndex::get)
            .collect()
    }

    #[rstest]
    fn keeps_the_closest_and_orders_by_progress() {
        let coords = [
            Coord { x: 0.8, y: 0.01 },
            Coord { x: 0.5, y: 0.5 },
            Coord { x: 0.2, y: -0.02 },
            Coord { x: 0.6, y: 0.03 },
        ];
        assert_eq!(select(&coords, 3), vec![2, 3, 0]);
    }

    #[rstest]
    fn ties_keep_registry_order() {
        let coords = [
            Coord { x: 0.5, y: 0.01 },
            Coord { x: 0.5, y: -0.01 },
            Coord { x: 0.5, y: 0.01 },
        ];
        assert_eq!(select(&coords, 2), vec![0, 1]);
    }

    #[rstest]
    fn limit_larger_than_registry_keeps_everything() {
        let coords = [Coord { x: 0.9, y: 0.0 }, Coord { x: 0.1, y: 0.0 }];
        assert_eq!(select(&coords, 8), vec![1, 0]);
    }
}

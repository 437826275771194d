//! Planar corridor geometry between a start and end coordinate.
//!
//! Both helpers treat longitude/latitude degrees as a flat plane. That is
//! only accurate at city scale, which is the scale crawls are planned at.

use geo::Coord;

/// Rough length of one degree, in meters, used to scale planar distances.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Normalised position of `point` projected onto the segment `start -> end`.
///
/// Returns `0.0` at `start`, `1.0` at `end`, and clamps projections that fall
/// outside the segment. A degenerate segment (`start == end`) yields `0.0`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pubcrawl_core::geometry::progress;
///
/// let start = Coord { x: 0.0, y: 0.0 };
/// let end = Coord { x: 2.0, y: 0.0 };
/// assert_eq!(progress(start, end, Coord { x: 0.5, y: 3.0 }), 0.25);
/// assert_eq!(progress(start, end, Coord { x: -1.0, y: 0.0 }), 0.0);
/// assert_eq!(progress(start, start, Coord { x: 1.0, y: 1.0 }), 0.0);
/// ```
#[must_use]
pub fn progress(start: Coord<f64>, end: Coord<f64>, point: Coord<f64>) -> f64 {
    let axis = end - start;
    let offset = point - start;
    let length_sq = axis.x * axis.x + axis.y * axis.y;
    if length_sq == 0.0 {
        return 0.0;
    }
    let t = (offset.x * axis.x + offset.y * axis.y) / length_sq;
    t.clamp(0.0, 1.0)
}

/// Perpendicular distance in meters from `point` to the line through
/// `start` and `end`.
///
/// The line is unbounded, so points beyond either endpoint are measured
/// against its extension. A degenerate segment falls back to the straight-line
/// distance from `start`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pubcrawl_core::geometry::{METERS_PER_DEGREE, corridor_distance};
///
/// let start = Coord { x: 0.0, y: 0.0 };
/// let end = Coord { x: 1.0, y: 0.0 };
/// let width = corridor_distance(start, end, Coord { x: 0.3, y: 0.01 });
/// assert!((width - 0.01 * METERS_PER_DEGREE).abs() < 1e-6);
/// ```
#[must_use]
pub fn corridor_distance(start: Coord<f64>, end: Coord<f64>, point: Coord<f64>) -> f64 {
    let axis = end - start;
    let offset = point - start;
    let length = axis.x.hypot(axis.y);
    if length == 0.0 {
        return offset.x.hypot(offset.y) * METERS_PER_DEGREE;
    }
    let cross = (axis.x * offset.y - axis.y * offset.x).abs();
    cross / length * METERS_PER_DEGREE
}

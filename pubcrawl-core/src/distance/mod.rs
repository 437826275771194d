//! Walking distances between venues and the caller's endpoints.
//!
//! Pub-to-pub distances come from a precomputed, dense [`DistanceMatrix`].
//! Distances between a venue and an arbitrary coordinate (the crawl's start
//! or end) come from a [`DistanceOracle`], which is usually backed by a
//! remote routing service and is therefore queried in batches.
//!
//! All distances are in meters. Unreachable pairs are reported as
//! [`f64::INFINITY`] rather than as errors.

mod error;
mod matrix;
mod oracle;

pub use error::{DistanceError, DistanceLookupError};
pub use matrix::{DistanceMatrix, DistanceMatrixError};
pub use oracle::DistanceOracle;

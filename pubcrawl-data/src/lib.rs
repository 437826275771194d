//! Data plumbing for the pub crawl planner.
//!
//! This crate loads venues from `pubs.json`, talks to an OSRM routing
//! service, precomputes the pub-to-pub distance matrix and persists it as a
//! `bincode` artefact. It also encodes leg geometries as Google polylines.
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use pubcrawl_data::routing::OsrmClient;
//! use pubcrawl_data::{MatrixArtefact, load_pubs, precompute_distance_matrix, write_matrix_artefact};
//!
//! let registry = load_pubs(Utf8Path::new("pubs.json"))?;
//! let client = OsrmClient::new("http://localhost:5005")?;
//! let matrix = precompute_distance_matrix(&client, &registry)?;
//! write_matrix_artefact(
//!     Utf8Path::new("distances.bin"),
//!     &MatrixArtefact::new(&registry, matrix),
//! )?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod error;
pub mod fs;
mod matrix;
mod polyline;
mod pubs;
pub mod routing;

pub use error::{LoadError, PersistError, PrecomputeError};
pub use matrix::{
    MAX_BATCH_SIZE, MatrixArtefact, load_matrix_for, precompute_distance_matrix,
    read_matrix_artefact, write_matrix_artefact,
};
pub use polyline::{PolylineError, decode_polyline, encode_polyline};
pub use pubs::{load_pubs, read_pubs};

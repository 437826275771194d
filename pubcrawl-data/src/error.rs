//! Error types raised while loading, computing and persisting artefacts.

use camino::Utf8PathBuf;
use pubcrawl_core::{DistanceError, DistanceMatrixError, RegistryError};
use thiserror::Error;

/// Errors raised while reading venue data or a matrix artefact.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Opening or reading the file failed.
    #[error("failed to read {path}")]
    Read {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The venue file is not a JSON array of pub records.
    #[error("failed to parse pubs from {path}")]
    ParsePubs {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The venue file repeats an identifier.
    #[error("invalid pubs in {path}")]
    Registry {
        /// Requested path.
        path: Utf8PathBuf,
        /// Registry construction failure.
        #[source]
        source: RegistryError,
    },
    /// Decoding the matrix artefact from `bincode` failed.
    #[error("failed to decode distance matrix from {path}")]
    DecodeMatrix {
        /// Requested path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
    /// The artefact was computed for a different set or order of pubs.
    #[error("distance matrix in {path} does not match the pubs: {reason}")]
    StaleMatrix {
        /// Requested path.
        path: Utf8PathBuf,
        /// First difference found.
        reason: String,
    },
}

/// Errors raised while writing a matrix artefact.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Creating the parent directory or the file failed.
    #[error("failed to create {path}")]
    Create {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// Serialising the artefact to `bincode` failed.
    #[error("failed to serialise distance matrix into {path}")]
    Serialise {
        /// Target file path.
        path: Utf8PathBuf,
        /// Source error from `bincode`.
        #[source]
        source: bincode::Error,
    },
}

/// Errors raised while precomputing the pub-to-pub distance matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PrecomputeError {
    /// A table request for one block failed.
    #[error("distance table for rows {rows_start}.. and columns {cols_start}.. failed: {source}")]
    Oracle {
        /// First registry index of the row batch.
        rows_start: usize,
        /// First registry index of the column batch.
        cols_start: usize,
        /// Underlying failure.
        #[source]
        source: DistanceError,
    },
    /// The assembled values do not form a valid matrix.
    #[error(transparent)]
    Matrix(#[from] DistanceMatrixError),
}

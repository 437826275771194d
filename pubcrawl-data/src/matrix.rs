//! Pub-to-pub distance matrix precomputation and persistence.
//!
//! The matrix is built once per venue set with batched table queries and
//! stored next to the pub identifiers it was computed for, so a stale
//! artefact is caught when it is loaded against a different `pubs.json`.

use std::io::{BufReader, BufWriter};
use std::ops::Range;

use bincode::Options;
use camino::Utf8Path;
use log::{debug, info};
use pubcrawl_core::{DistanceError, DistanceMatrix, DistanceOracle, PubRegistry};
use serde::{Deserialize, Serialize};

use crate::fs::{create_file, open_file};
use crate::{LoadError, PersistError, PrecomputeError};

/// Largest number of pubs on either side of one table request.
pub const MAX_BATCH_SIZE: usize = 50;

/// Bincode options used for matrix artefacts.
fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new()
}

/// Compute the full pub-to-pub walking distance matrix for `registry`.
///
/// Registries of at most [`MAX_BATCH_SIZE`] pubs are answered by a single
/// table request. Larger registries are split into batches; every pair of
/// batches `(i, j)` is one request carrying batch `i` followed by batch `j`,
/// from which the `i`-rows by `j`-columns block is kept.
///
/// # Errors
///
/// Returns [`PrecomputeError::Oracle`] for the first failed request and
/// [`PrecomputeError::Matrix`] when the oracle returns negative or NaN
/// distances.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use pubcrawl_core::PubIndex;
/// use pubcrawl_core::test_support::{PlanarDistanceOracle, registry_from_coords};
/// use pubcrawl_data::precompute_distance_matrix;
///
/// let registry = registry_from_coords(&[Coord { x: 0.0, y: 0.0 }, Coord { x: 0.5, y: 0.0 }]);
/// let matrix = precompute_distance_matrix(&PlanarDistanceOracle, &registry)?;
/// assert_eq!(matrix.get(PubIndex::new(0), PubIndex::new(1)), Some(55_500.0));
/// # Ok::<(), pubcrawl_data::PrecomputeError>(())
/// ```
pub fn precompute_distance_matrix<O: DistanceOracle + ?Sized>(
    oracle: &O,
    registry: &PubRegistry,
) -> Result<DistanceMatrix, PrecomputeError> {
    let coords: Vec<_> = registry.iter().map(|(_, venue)| venue.location).collect();
    let size = coords.len();
    if size == 0 {
        return Ok(DistanceMatrix::default());
    }

    if size <= MAX_BATCH_SIZE {
        debug!("requesting a single {size}x{size} distance table");
        let table = oracle
            .distance_table(&coords)
            .map_err(|source| PrecomputeError::Oracle {
                rows_start: 0,
                cols_start: 0,
                source,
            })?;
        check_shape(&table, size, size).map_err(|source| PrecomputeError::Oracle {
            rows_start: 0,
            cols_start: 0,
            source,
        })?;
        return Ok(DistanceMatrix::from_rows(table)?);
    }

    let batches: Vec<Range<usize>> = (0..size)
        .step_by(MAX_BATCH_SIZE)
        .map(|start| start..size.min(start + MAX_BATCH_SIZE))
        .collect();
    let total = batches.len() * batches.len();
    info!("precomputing {size}x{size} distances in {total} blocks");

    let mut values = vec![f64::INFINITY; size * size];
    for (block, (rows, cols)) in batches
        .iter()
        .flat_map(|rows| batches.iter().map(move |cols| (rows, cols)))
        .enumerate()
    {
        debug!(
            "block {}/{total}: rows {rows:?}, columns {cols:?}",
            block + 1
        );
        let fail = |source| PrecomputeError::Oracle {
            rows_start: rows.start,
            cols_start: cols.start,
            source,
        };
        let request: Vec<_> = coords
            .get(rows.clone())
            .into_iter()
            .chain(coords.get(cols.clone()))
            .flatten()
            .copied()
            .collect();
        let table = oracle.distance_table(&request).map_err(fail)?;
        fill_block(&mut values, size, rows, cols, &table).map_err(fail)?;
    }

    Ok(DistanceMatrix::new(size, values)?)
}

fn check_shape(table: &[Vec<f64>], rows: usize, cols: usize) -> Result<(), DistanceError> {
    if table.len() != rows {
        return Err(DistanceError::LengthMismatch {
            expected: rows,
            actual: table.len(),
        });
    }
    match table.iter().find(|row| row.len() != cols) {
        Some(row) => Err(DistanceError::LengthMismatch {
            expected: cols,
            actual: row.len(),
        }),
        None => Ok(()),
    }
}

/// Copy the `rows x cols` block of a combined `(rows ++ cols)` table into
/// the flat row-major `values`.
fn fill_block(
    values: &mut [f64],
    size: usize,
    rows: &Range<usize>,
    cols: &Range<usize>,
    table: &[Vec<f64>],
) -> Result<(), DistanceError> {
    let width = rows.len() + cols.len();
    check_shape(table, width, width)?;
    for (row, global_row) in table.iter().zip(rows.clone()) {
        let start = global_row * size + cols.start;
        let block = row.get(rows.len()..width);
        let target = values.get_mut(start..start + cols.len());
        if let (Some(block), Some(target)) = (block, target) {
            target.copy_from_slice(block);
        }
    }
    Ok(())
}

/// A distance matrix together with the pub identifiers of its rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixArtefact {
    /// Pub identifiers in registry order.
    pub pub_ids: Vec<String>,
    /// Pub-to-pub distances in meters.
    pub matrix: DistanceMatrix,
}

impl MatrixArtefact {
    /// Pair `matrix` with the identifiers of `registry`.
    #[must_use]
    pub fn new(registry: &PubRegistry, matrix: DistanceMatrix) -> Self {
        Self {
            pub_ids: registry.ids().map(str::to_owned).collect(),
            matrix,
        }
    }

    /// Return the first difference between this artefact and `registry`,
    /// if any.
    #[must_use]
    pub fn mismatch(&self, registry: &PubRegistry) -> Option<String> {
        if self.pub_ids.len() != registry.len() {
            return Some(format!(
                "artefact has {} pubs but {} were loaded",
                self.pub_ids.len(),
                registry.len()
            ));
        }
        if self.matrix.size() != self.pub_ids.len() {
            return Some(format!(
                "matrix is {} wide for {} pubs",
                self.matrix.size(),
                self.pub_ids.len()
            ));
        }
        self.pub_ids
            .iter()
            .zip(registry.ids())
            .position(|(stored, loaded)| stored != loaded)
            .map(|index| format!("pub {index} differs"))
    }
}

/// Write `artefact` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`PersistError`] when the file cannot be created or written.
pub fn write_matrix_artefact(
    path: &Utf8Path,
    artefact: &MatrixArtefact,
) -> Result<(), PersistError> {
    let file = create_file(path).map_err(|source| PersistError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    bincode_options()
        .serialize_into(BufWriter::new(file), artefact)
        .map_err(|source| PersistError::Serialise {
            path: path.to_path_buf(),
            source,
        })?;
    info!(
        "wrote {}x{} distance matrix to {path}",
        artefact.matrix.size(),
        artefact.matrix.size()
    );
    Ok(())
}

/// Read a matrix artefact from `path` without checking it against any
/// registry.
///
/// # Errors
///
/// Returns [`LoadError`] when the file cannot be read or decoded.
pub fn read_matrix_artefact(path: &Utf8Path) -> Result<MatrixArtefact, LoadError> {
    let file = open_file(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    bincode_options()
        .deserialize_from(BufReader::new(file))
        .map_err(|source| LoadError::DecodeMatrix {
            path: path.to_path_buf(),
            source,
        })
}

/// Load the matrix stored at `path` and check it was computed for
/// `registry`, pub for pub and in the same order.
///
/// # Errors
///
/// Returns [`LoadError::StaleMatrix`] when the identifiers differ, or the
/// errors of [`read_matrix_artefact`].
pub fn load_matrix_for(
    path: &Utf8Path,
    registry: &PubRegistry,
) -> Result<DistanceMatrix, LoadError> {
    let artefact = read_matrix_artefact(path)?;
    if let Some(reason) = artefact.mismatch(registry) {
        return Err(LoadError::StaleMatrix {
            path: path.to_path_buf(),
            reason,
        });
    }
    Ok(artefact.matrix)
}

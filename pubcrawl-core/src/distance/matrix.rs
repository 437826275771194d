//! Dense pub-to-pub distance matrix.

use thiserror::Error;

use crate::PubIndex;

/// Errors returned when building a [`DistanceMatrix`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceMatrixError {
    /// A row's length differs from the number of rows.
    #[error("row {row} has {len} entries; expected {expected}")]
    NotSquare {
        /// Offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// The matrix dimension.
        expected: usize,
    },
    /// The flat value buffer does not hold `size * size` entries.
    #[error("expected {expected} entries for the matrix but found {actual}")]
    WrongLength {
        /// `size * size`.
        expected: usize,
        /// Supplied length.
        actual: usize,
    },
    /// An entry is negative or NaN.
    #[error("entry ({from}, {to}) is {value}; distances must be non-negative")]
    InvalidEntry {
        /// Row index.
        from: usize,
        /// Column index.
        to: usize,
        /// The rejected value.
        value: f64,
    },
}

/// Square table of walking distances in meters, indexed by [`PubIndex`].
///
/// Entry `(i, j)` is the distance from venue `i` to venue `j`; the matrix is
/// not assumed to be symmetric. Infinite entries mark unreachable pairs.
///
/// # Examples
/// ```
/// use pubcrawl_core::{DistanceMatrix, PubIndex};
///
/// # fn main() -> Result<(), pubcrawl_core::DistanceMatrixError> {
/// let matrix = DistanceMatrix::from_rows(vec![vec![0.0, 120.0], vec![135.0, 0.0]])?;
/// assert_eq!(matrix.size(), 2);
/// assert_eq!(matrix.get(PubIndex::new(1), PubIndex::new(0)), Some(135.0));
/// assert_eq!(matrix.get(PubIndex::new(2), PubIndex::new(0)), None);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MatrixRepr", into = "MatrixRepr"))]
pub struct DistanceMatrix {
    size: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Build a matrix from a flat, row-major buffer of `size * size` values.
    pub fn new(size: usize, values: Vec<f64>) -> Result<Self, DistanceMatrixError> {
        let expected = size.saturating_mul(size);
        if values.len() != expected {
            return Err(DistanceMatrixError::WrongLength {
                expected,
                actual: values.len(),
            });
        }
        if let Some((position, value)) = values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| value.is_nan() || *value < 0.0)
        {
            let (from, to) = (position.div_euclid(size), position.rem_euclid(size));
            return Err(DistanceMatrixError::InvalidEntry { from, to, value });
        }
        Ok(Self { size, values })
    }

    /// Build a matrix from nested rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DistanceMatrixError> {
        let size = rows.len();
        let mut values = Vec::with_capacity(size.saturating_mul(size));
        for (row, entries) in rows.into_iter().enumerate() {
            if entries.len() != size {
                return Err(DistanceMatrixError::NotSquare {
                    row,
                    len: entries.len(),
                    expected: size,
                });
            }
            values.extend(entries);
        }
        Self::new(size, values)
    }

    /// Number of rows (and columns).
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Distance from `from` to `to`, or `None` when either index is out of
    /// range.
    #[must_use]
    pub fn get(&self, from: PubIndex, to: PubIndex) -> Option<f64> {
        if from.get() >= self.size || to.get() >= self.size {
            return None;
        }
        self.values
            .get(from.get().checked_mul(self.size)?.checked_add(to.get())?)
            .copied()
    }

    /// Iterate rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.values.chunks(self.size.max(1))
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct MatrixRepr {
    size: usize,
    values: Vec<f64>,
}

impl TryFrom<MatrixRepr> for DistanceMatrix {
    type Error = DistanceMatrixError;

    fn try_from(repr: MatrixRepr) -> Result<Self, Self::Error> {
        Self::new(repr.size, repr.values)
    }
}

impl From<DistanceMatrix> for MatrixRepr {
    fn from(matrix: DistanceMatrix) -> Self {
        Self {
            size: matrix.size,
            values: matrix.values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rejects_ragged_rows() {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![1.0]])
            .expect_err("ragged rows");
        assert_eq!(
            err,
            DistanceMatrixError::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    fn rejects_invalid_entries(#[case] value: f64) {
        let err = DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![value, 0.0]])
            .expect_err("invalid entry");
        assert!(matches!(
            err,
            DistanceMatrixError::InvalidEntry { from: 1, to: 0, .. }
        ));
    }

    #[rstest]
    fn accepts_unreachable_entries() {
        let matrix = DistanceMatrix::from_rows(vec![vec![0.0, f64::INFINITY], vec![3.0, 0.0]])
            .expect("infinite entries mark unreachable pairs");
        assert_eq!(
            matrix.get(PubIndex::new(0), PubIndex::new(1)),
            Some(f64::INFINITY)
        );
    }

    #[rstest]
    fn lookups_are_directional() {
        let matrix =
            DistanceMatrix::from_rows(vec![vec![0.0, 10.0], vec![20.0, 0.0]]).expect("valid");
        assert_eq!(matrix.get(PubIndex::new(0), PubIndex::new(1)), Some(10.0));
        assert_eq!(matrix.get(PubIndex::new(1), PubIndex::new(0)), Some(20.0));
        assert_eq!(matrix.get(PubIndex::new(0), PubIndex::new(2)), None);
    }

    #[rstest]
    fn wrong_flat_length_is_rejected() {
        let err = DistanceMatrix::new(2, vec![0.0; 3]).expect_err("wrong length");
        assert_eq!(
            err,
            DistanceMatrixError::WrongLength {
                expected: 4,
                actual: 3
            }
        );
    }

    #[rstest]
    fn rows_are_row_major() {
        let matrix =
            DistanceMatrix::from_rows(vec![vec![0.0, 1.0], vec![2.0, 0.0]]).expect("valid");
        let rows: Vec<Vec<f64>> = matrix.rows().map(<[f64]>::to_vec).collect();
        assert_eq!(rows, vec![vec![0.0, 1.0], vec![2.0, 0.0]]);
    }
}

//! Pairwise Matrix - Square reciprocal matrix of subjective comparisons.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use super::comparison_value::validate_comparison;
use crate::domain::foundation::AnalysisError;

/// An n×n reciprocal comparison matrix.
///
/// # Invariants
/// - `M[i][i] = 1` for all i
/// - `M[j][i] = 1 / M[i][j]` for all i ≠ j
/// - all entries strictly positive
///
/// The only mutation path is [`PairwiseMatrix::set`], which writes both
/// halves of a pair or neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct PairwiseMatrix {
    size: usize,
    /// Row-major entries.
    entries: Vec<f64>,
}

impl PairwiseMatrix {
    /// Creates an n×n matrix filled with ones (every pair judged equal).
    pub fn new(size: usize) -> Self {
        Self {
            size,
            entries: vec![1.0; size * size],
        }
    }

    /// Returns n.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `M[i][j]`.
    pub fn get(&self, i: usize, j: usize) -> Result<f64, AnalysisError> {
        self.check_index(i)?;
        self.check_index(j)?;
        Ok(self.entries[i * self.size + j])
    }

    /// Records "item i is `value` times as important as item j".
    ///
    /// Writes `M[i][j] = value` and `M[j][i] = 1/value`. All checks happen
    /// before either cell is touched.
    ///
    /// # Errors
    /// - `OutOfRange` if `i` or `j` is not below n
    /// - `InvalidValue` if `i == j` or `value` is not finite and positive
    pub fn set(&mut self, i: usize, j: usize, value: f64) -> Result<(), AnalysisError> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j {
            return Err(AnalysisError::invalid_value(
                "comparison",
                "the diagonal is fixed at 1 and cannot be written",
            ));
        }
        let value = validate_comparison(value)?;

        self.entries[i * self.size + j] = value;
        self.entries[j * self.size + i] = 1.0 / value;
        Ok(())
    }

    /// Returns row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.entries[i * self.size..(i + 1) * self.size]
    }

    /// Returns all rows as owned vectors.
    pub fn rows(&self) -> Vec<Vec<f64>> {
        (0..self.size).map(|i| self.row(i).to_vec()).collect()
    }

    /// Computes `M · w`.
    pub fn multiply(&self, w: &[f64]) -> Result<Vec<f64>, AnalysisError> {
        if w.len() != self.size {
            return Err(AnalysisError::dimension_mismatch("vector", self.size, w.len()));
        }
        Ok((0..self.size)
            .map(|i| self.row(i).iter().zip(w).map(|(m, x)| m * x).sum())
            .collect())
    }

    /// Returns the column sums.
    pub fn column_sums(&self) -> Vec<f64> {
        (0..self.size)
            .map(|j| (0..self.size).map(|i| self.entries[i * self.size + j]).sum())
            .collect()
    }

    /// Copies the matrix into a nalgebra matrix.
    pub fn to_dmatrix(&self) -> DMatrix<f64> {
        DMatrix::from_row_slice(self.size, self.size, &self.entries)
    }

    fn check_index(&self, index: usize) -> Result<(), AnalysisError> {
        if index >= self.size {
            return Err(AnalysisError::out_of_range(index, self.size));
        }
        Ok(())
    }
}

impl TryFrom<Vec<Vec<f64>>> for PairwiseMatrix {
    type Error = AnalysisError;

    /// Builds a matrix from full rows, verifying every invariant.
    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        let size = rows.len();
        let mut matrix = PairwiseMatrix::new(size);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(AnalysisError::dimension_mismatch(
                    format!("row {}", i),
                    size,
                    row.len(),
                ));
            }
            if (row[i] - 1.0).abs() > RECIPROCAL_TOLERANCE {
                return Err(AnalysisError::invalid_value(
                    "matrix",
                    format!("diagonal entry {} must be 1, got {}", i, row[i]),
                ));
            }
        }

        for i in 0..size {
            for j in (i + 1)..size {
                let upper = rows[i][j];
                let lower = rows[j][i];
                matrix.set(i, j, upper)?;
                if (upper * lower - 1.0).abs() > RECIPROCAL_TOLERANCE {
                    return Err(AnalysisError::invalid_value(
                        "matrix",
                        format!("entries ({}, {}) and ({}, {}) are not reciprocal", i, j, j, i),
                    ));
                }
            }
        }

        Ok(matrix)
    }
}

impl From<PairwiseMatrix> for Vec<Vec<f64>> {
    fn from(matrix: PairwiseMatrix) -> Self {
        matrix.rows()
    }
}

/// Tolerance when checking reciprocity of externally supplied rows.
const RECIPROCAL_TOLERANCE: f64 = 1e-6;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_matrix_is_all_ones() {
        let m = PairwiseMatrix::new(3);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(m.get(i, j).unwrap(), 1.0);
            }
        }
    }

    #[test]
    fn set_writes_reciprocal() {
        let mut m = PairwiseMatrix::new(3);
        m.set(0, 2, 4.0).unwrap();

        assert_eq!(m.get(0, 2).unwrap(), 4.0);
        assert_eq!(m.get(2, 0).unwrap(), 0.25);
        assert_eq!(m.get(0, 0).unwrap(), 1.0);
    }

    #[test]
    fn later_write_to_mirror_cell_overrides_both() {
        let mut m = PairwiseMatrix::new(2);
        m.set(0, 1, 3.0).unwrap();
        m.set(1, 0, 5.0).unwrap();

        assert_eq!(m.get(1, 0).unwrap(), 5.0);
        assert_eq!(m.get(0, 1).unwrap(), 0.2);
    }

    #[test]
    fn set_rejects_out_of_range_without_mutating() {
        let mut m = PairwiseMatrix::new(2);
        let err = m.set(0, 2, 3.0).unwrap_err();

        assert_eq!(err, AnalysisError::out_of_range(2, 2));
        assert_eq!(m, PairwiseMatrix::new(2));
    }

    #[test]
    fn set_rejects_non_positive_without_mutating() {
        let mut m = PairwiseMatrix::new(2);
        m.set(0, 1, 2.0).unwrap();

        assert!(m.set(0, 1, 0.0).is_err());
        assert!(m.set(0, 1, -3.0).is_err());
        assert!(m.set(0, 1, f64::NAN).is_err());
        assert!(m.set(0, 1, f64::INFINITY).is_err());

        assert_eq!(m.get(0, 1).unwrap(), 2.0);
        assert_eq!(m.get(1, 0).unwrap(), 0.5);
    }

    #[test]
    fn set_rejects_diagonal() {
        let mut m = PairwiseMatrix::new(2);
        assert!(matches!(
            m.set(1, 1, 3.0),
            Err(AnalysisError::InvalidValue { .. })
        ));
        assert_eq!(m.get(1, 1).unwrap(), 1.0);
    }

    #[test]
    fn multiply_and_column_sums() {
        let mut m = PairwiseMatrix::new(2);
        m.set(0, 1, 3.0).unwrap();

        let product = m.multiply(&[0.75, 0.25]).unwrap();
        assert!((product[0] - 1.5).abs() < 1e-12);
        assert!((product[1] - 0.5).abs() < 1e-12);

        let sums = m.column_sums();
        assert!((sums[0] - 4.0 / 3.0).abs() < 1e-12);
        assert!((sums[1] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn multiply_checks_dimensions() {
        let m = PairwiseMatrix::new(3);
        assert!(matches!(
            m.multiply(&[1.0, 1.0]),
            Err(AnalysisError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn try_from_rows_accepts_reciprocal_matrix() {
        let m = PairwiseMatrix::try_from(vec![
            vec![1.0, 2.0, 4.0],
            vec![0.5, 1.0, 2.0],
            vec![0.25, 0.5, 1.0],
        ])
        .unwrap();
        assert_eq!(m.size(), 3);
        assert_eq!(m.get(2, 0).unwrap(), 0.25);
    }

    #[test]
    fn try_from_rows_rejects_non_reciprocal_matrix() {
        let result = PairwiseMatrix::try_from(vec![vec![1.0, 2.0], vec![2.0, 1.0]]);
        assert!(result.is_err());
    }

    #[test]
    fn try_from_rows_rejects_bad_diagonal_and_ragged_rows() {
        assert!(PairwiseMatrix::try_from(vec![vec![2.0, 1.0], vec![1.0, 1.0]]).is_err());
        assert!(PairwiseMatrix::try_from(vec![vec![1.0, 1.0], vec![1.0]]).is_err());
    }

    #[test]
    fn serde_uses_row_form() {
        let mut m = PairwiseMatrix::new(2);
        m.set(0, 1, 4.0).unwrap();

        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[1.0,4.0],[0.25,1.0]]");

        let back: PairwiseMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
